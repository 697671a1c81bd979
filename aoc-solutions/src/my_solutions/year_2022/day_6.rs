use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

const PACKET_MARKER: usize = 4;
const MESSAGE_MARKER: usize = 14;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 6, tags = ["2022", "window"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = &'a [u8];

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let stream = input.trim();
        if stream.is_empty() {
            return Err(ParseError::MissingData("empty datastream".to_string()));
        }
        if !stream.is_ascii() {
            return Err(ParseError::InvalidFormat(
                "datastream must be ASCII".to_string(),
            ));
        }
        Ok(stream.as_bytes())
    }
}

/// Number of characters consumed once the last `size` are all different
pub fn find_marker(stream: &[u8], size: usize) -> Option<usize> {
    // Position of the last occurrence of each byte, plus the start of the
    // current run of distinct bytes.
    let mut last_seen = [None::<usize>; 256];
    let mut run_start = 0;
    for (idx, &byte) in stream.iter().enumerate() {
        if let Some(prev) = last_seen[byte as usize]
            && prev >= run_start
        {
            run_start = prev + 1;
        }
        last_seen[byte as usize] = Some(idx);
        if idx + 1 - run_start == size {
            return Some(idx + 1);
        }
    }
    None
}

fn solve_marker(stream: &[u8], size: usize) -> Result<String, SolveError> {
    find_marker(stream, size)
        .map(|n| n.to_string())
        .ok_or_else(|| SolveError::failed(format!("no run of {} distinct characters", size)))
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        solve_marker(shared, PACKET_MARKER)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        solve_marker(shared, MESSAGE_MARKER)
    }
}
