use crate::utils::priority::ItemSet;
use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

const GROUP_SIZE: usize = 3;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 3, tags = ["2022", "sets"])]
pub struct Solver;

impl AocParser for Solver {
    /// One rucksack per line, borrowed from the input
    type SharedData<'a> = Vec<&'a [u8]>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(idx, line)| {
                if line.bytes().all(|b| b.is_ascii_alphabetic()) {
                    Ok(line.as_bytes())
                } else {
                    Err(anyhow!("(rucksack {}) non-letter item in `{}`", idx + 1, line))
                }
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut total = 0;
        for (idx, rucksack) in shared.iter().enumerate() {
            if rucksack.len() % 2 != 0 {
                return Err(SolveError::failed(format!(
                    "rucksack {} has an odd number of items",
                    idx + 1
                )));
            }
            let (left, right) = rucksack.split_at(rucksack.len() / 2);
            total += ItemSet::from_items(left)
                .intersection(ItemSet::from_items(right))
                .single_priority()
                .ok_or_else(|| {
                    SolveError::failed(format!(
                        "rucksack {} has no single item in both compartments",
                        idx + 1
                    ))
                })?;
        }
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        if shared.len() % GROUP_SIZE != 0 {
            return Err(SolveError::failed(format!(
                "{} rucksacks cannot be split into groups of {}",
                shared.len(),
                GROUP_SIZE
            )));
        }
        let mut total = 0;
        for (idx, group) in shared.chunks(GROUP_SIZE).enumerate() {
            total += group
                .iter()
                .map(|rucksack| ItemSet::from_items(rucksack))
                .reduce(ItemSet::intersection)
                .and_then(ItemSet::single_priority)
                .ok_or_else(|| {
                    SolveError::failed(format!("group {} has no single badge", idx + 1))
                })?;
        }
        Ok(total.to_string())
    }
}
