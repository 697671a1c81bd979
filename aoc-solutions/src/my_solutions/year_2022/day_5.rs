use crate::utils::crate_stacks::{Instruction, PositionalRecord, StackError, Stacks, scan_crate_row};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 5, tags = ["2022", "parsing", "stacks"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData {
    stacks: Stacks,
    instructions: Vec<Instruction>,
}

/// What a single input line is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SupplyLine<'a> {
    CrateRow(&'a str),
    Labels,
    Move(&'a str),
    Blank,
}

fn classify(line: &str) -> Option<SupplyLine<'_>> {
    let trimmed = line.trim_start();
    if trimmed.is_empty() {
        Some(SupplyLine::Blank)
    } else if trimmed.starts_with('[') {
        Some(SupplyLine::CrateRow(line))
    } else if trimmed.starts_with("move") {
        Some(SupplyLine::Move(trimmed))
    } else if trimmed.starts_with(|c: char| c.is_ascii_digit()) {
        Some(SupplyLine::Labels)
    } else {
        None
    }
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut records: Vec<PositionalRecord> = Vec::new();
        let mut instructions = Vec::new();

        for (line_idx, line) in input.lines().enumerate() {
            let line_error = |e: &dyn std::fmt::Display| {
                ParseError::InvalidFormat(format!("(line {}) {}", line_idx + 1, e))
            };
            match classify(line) {
                Some(SupplyLine::CrateRow(row)) => records.extend(scan_crate_row(row)),
                Some(SupplyLine::Move(text)) => instructions.push(
                    text.parse::<Instruction>()
                        .map_err(|e| line_error(&e))?,
                ),
                Some(SupplyLine::Labels | SupplyLine::Blank) => {}
                None => return Err(line_error(&format!("unrecognised line `{}`", line))),
            }
        }

        if records.is_empty() {
            return Err(ParseError::MissingData("no crate diagram".to_string()));
        }

        let stacks = Stacks::from_rows(&records);
        log::debug!(
            "day 5: {} crates in {} columns, {} moves",
            stacks.total_crates(),
            stacks.columns().len(),
            instructions.len()
        );
        Ok(SharedData {
            stacks,
            instructions,
        })
    }
}

/// Replay every instruction on a copy of the starting stacks
fn replay(
    shared: &SharedData,
    apply: impl Fn(&mut Stacks, &Instruction) -> Result<(), StackError>,
) -> Result<String, SolveError> {
    let mut stacks = shared.stacks.clone();
    for (idx, instruction) in shared.instructions.iter().enumerate() {
        apply(&mut stacks, instruction).map_err(|e| {
            SolveError::failed(format!("step {} (`{}`): {}", idx + 1, instruction, e))
        })?;
    }
    Ok(stacks.top_symbols())
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        replay(shared, Stacks::apply_one_by_one)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        replay(shared, Stacks::apply_bulk)
    }
}
