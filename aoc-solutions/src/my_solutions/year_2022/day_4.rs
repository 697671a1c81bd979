use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::ops::RangeInclusive;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 4, tags = ["2022", "ranges"])]
pub struct Solver;

type Sections = RangeInclusive<u32>;

fn contains(outer: &Sections, inner: &Sections) -> bool {
    outer.start() <= inner.start() && inner.end() <= outer.end()
}

fn overlaps(a: &Sections, b: &Sections) -> bool {
    a.start() <= b.end() && b.start() <= a.end()
}

fn parse_sections(text: &str) -> Result<Sections, anyhow::Error> {
    let (start, end) = text
        .split_once('-')
        .ok_or_else(|| anyhow!("expected `start-end`, got `{}`", text))?;
    let start: u32 = start.parse().with_context(|| format!("bad start in `{}`", text))?;
    let end: u32 = end.parse().with_context(|| format!("bad end in `{}`", text))?;
    if start > end {
        return Err(anyhow!("range `{}` ends before it starts", text));
    }
    Ok(start..=end)
}

fn parse_pair(line: &str) -> Result<(Sections, Sections), anyhow::Error> {
    let (first, second) = line
        .split_once(',')
        .ok_or_else(|| anyhow!("expected two comma-separated ranges"))?;
    Ok((parse_sections(first)?, parse_sections(second)?))
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<(Sections, Sections)>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(idx, line)| parse_pair(line).map_err(|e| anyhow!("(pair {}) {:#}", idx + 1, e)))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let count = shared
            .iter()
            .filter(|(a, b)| contains(a, b) || contains(b, a))
            .count();
        Ok(count.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let count = shared.iter().filter(|(a, b)| overlaps(a, b)).count();
        Ok(count.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const EXAMPLE: &str = "2-4,6-8\n2-3,4-5\n5-7,7-9\n2-8,3-7\n6-6,4-6\n2-6,4-8\n";

    #[test]
    fn example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "2");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "4");
    }

    #[test]
    fn identical_ranges_contain_each_other() {
        let a = 3..=5;
        assert!(contains(&a, &a));
        assert!(overlaps(&a, &a));
    }

    #[test]
    fn touching_ranges_overlap() {
        assert!(overlaps(&(1..=3), &(3..=9)));
        assert!(!overlaps(&(1..=2), &(3..=9)));
    }

    #[test]
    fn rejects_malformed_pairs() {
        assert!(Solver::parse("1-2").is_err());
        assert!(Solver::parse("1-2,x-3").is_err());
        let err = Solver::parse("1-2,3-4\n5-4,1-1").unwrap_err();
        assert!(err.to_string().contains("pair 2"));
    }
}
