use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::cmp::Ordering;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 2, tags = ["2022", "game"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Rock,
    Paper,
    Scissors,
}

impl Shape {
    fn points(self) -> u32 {
        match self {
            Shape::Rock => 1,
            Shape::Paper => 2,
            Shape::Scissors => 3,
        }
    }

    fn beats(self) -> Shape {
        match self {
            Shape::Rock => Shape::Scissors,
            Shape::Paper => Shape::Rock,
            Shape::Scissors => Shape::Paper,
        }
    }

    fn loses_to(self) -> Shape {
        match self {
            Shape::Rock => Shape::Paper,
            Shape::Paper => Shape::Scissors,
            Shape::Scissors => Shape::Rock,
        }
    }

    /// The shape to throw against `self` for the wanted result
    fn for_outcome(self, wanted: Ordering) -> Shape {
        match wanted {
            Ordering::Less => self.beats(),
            Ordering::Equal => self,
            Ordering::Greater => self.loses_to(),
        }
    }
}

/// `Greater` when `ours` wins, `Less` when it loses
pub fn play(ours: Shape, theirs: Shape) -> Ordering {
    if ours == theirs {
        Ordering::Equal
    } else if ours.beats() == theirs {
        Ordering::Greater
    } else {
        Ordering::Less
    }
}

/// Shape points plus 0 / 3 / 6 for a loss / draw / win
pub fn score(ours: Shape, theirs: Shape) -> u32 {
    let outcome = match play(ours, theirs) {
        Ordering::Less => 0,
        Ordering::Equal => 3,
        Ordering::Greater => 6,
    };
    ours.points() + outcome
}

/// Second column of the strategy guide; its meaning depends on the part
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hint {
    X,
    Y,
    Z,
}

impl Hint {
    fn as_shape(self) -> Shape {
        match self {
            Hint::X => Shape::Rock,
            Hint::Y => Shape::Paper,
            Hint::Z => Shape::Scissors,
        }
    }

    fn as_outcome(self) -> Ordering {
        match self {
            Hint::X => Ordering::Less,
            Hint::Y => Ordering::Equal,
            Hint::Z => Ordering::Greater,
        }
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<(Shape, Hint)>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(line_idx, line)| {
                parse_round(line.trim()).map_err(|e| anyhow!("(line {}) {}", line_idx + 1, e))
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

fn parse_round(line: &str) -> Result<(Shape, Hint), anyhow::Error> {
    let Some((theirs, hint)) = line.split_once(' ') else {
        bail!("expected two columns in `{}`", line);
    };
    let theirs = match theirs {
        "A" => Shape::Rock,
        "B" => Shape::Paper,
        "C" => Shape::Scissors,
        other => bail!("unknown opponent shape `{}`", other),
    };
    let hint = match hint.trim() {
        "X" => Hint::X,
        "Y" => Hint::Y,
        "Z" => Hint::Z,
        other => bail!("unknown hint `{}`", other),
    };
    Ok((theirs, hint))
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u32 = shared
            .iter()
            .map(|&(theirs, hint)| score(hint.as_shape(), theirs))
            .sum();
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u32 = shared
            .iter()
            .map(|&(theirs, hint)| score(theirs.for_outcome(hint.as_outcome()), theirs))
            .sum();
        Ok(total.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const EXAMPLE: &str = "A Y\nB X\nC Z\n";

    #[test]
    fn example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "15");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "12");
    }

    #[test]
    fn play_is_antisymmetric() {
        let shapes = [Shape::Rock, Shape::Paper, Shape::Scissors];
        for a in shapes {
            for b in shapes {
                assert_eq!(play(a, b), play(b, a).reverse());
            }
        }
        assert_eq!(play(Shape::Paper, Shape::Rock), Ordering::Greater);
        assert_eq!(play(Shape::Rock, Shape::Paper), Ordering::Less);
    }

    #[test]
    fn chosen_shape_produces_wanted_outcome() {
        for theirs in [Shape::Rock, Shape::Paper, Shape::Scissors] {
            for wanted in [Ordering::Less, Ordering::Equal, Ordering::Greater] {
                assert_eq!(play(theirs.for_outcome(wanted), theirs), wanted);
            }
        }
    }

    #[test]
    fn rejects_unknown_letters() {
        let err = Solver::parse("A Y\nD X").unwrap_err();
        assert!(err.to_string().contains("line 2"));
        assert!(Solver::parse("A W").is_err());
        assert!(Solver::parse("AY").is_err());
    }
}
