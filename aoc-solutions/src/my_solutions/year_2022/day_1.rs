use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 1, tags = ["2022", "sum"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData {
    /// Calories carried per elf, in input order
    totals: Vec<u64>,
    sorted_desc: Option<Vec<u64>>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut totals = Vec::new();
        let mut current: Option<u64> = None;

        for (line_idx, line) in input.trim_end().lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                if let Some(total) = current.take() {
                    totals.push(total);
                }
                continue;
            }
            let calories: u64 = line
                .parse()
                .map_err(|e| anyhow!("(line {}) {}: `{}`", line_idx + 1, e, line))
                .map_err(|e| ParseError::InvalidFormat(e.to_string()))?;
            *current.get_or_insert(0) += calories;
        }
        totals.extend(current);

        if totals.is_empty() {
            return Err(ParseError::MissingData("no calorie entries".to_string()));
        }

        Ok(SharedData {
            totals,
            sorted_desc: None,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(top_n_sum(shared, 1).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(top_n_sum(shared, 3).to_string())
    }
}

fn top_n_sum(shared: &mut SharedData, n: usize) -> u64 {
    shared
        .sorted_desc
        .get_or_insert_with(|| {
            let mut sorted = shared.totals.clone();
            sorted.sort_unstable_by(|a, b| b.cmp(a));
            sorted
        })
        .iter()
        .take(n)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const EXAMPLE: &str = "1000\n2000\n3000\n\n4000\n\n5000\n6000\n\n7000\n8000\n9000\n\n10000\n";

    #[test]
    fn example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(shared.totals, vec![6000, 4000, 11000, 24000, 10000]);
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "24000");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "45000");
    }

    #[test]
    fn part_two_alone() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "45000");
    }

    #[test]
    fn fewer_than_three_elves() {
        let mut shared = Solver::parse("5\n\n7").unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "12");
    }

    #[test]
    fn consecutive_blank_lines_do_not_create_empty_elves() {
        let shared = Solver::parse("1\n\n\n2").unwrap();
        assert_eq!(shared.totals, vec![1, 2]);
    }

    #[test]
    fn rejects_non_numbers() {
        let err = Solver::parse("100\nabc").unwrap_err();
        assert!(err.to_string().contains("line 2"));
        assert!(matches!(Solver::parse("\n\n"), Err(ParseError::MissingData(_))));
    }
}
