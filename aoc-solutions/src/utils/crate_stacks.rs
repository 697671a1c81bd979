//! Crate-stack diagrams: the bracket scanner, stack columns and move replay
//!
//! A diagram row is fixed-width, four characters per column:
//!
//! ```text
//!     [D]
//! [N] [C]
//! [Z] [M] [P]
//!  1   2   3
//! ```

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Width of one diagram column, `"[A] "`
pub const COLUMN_WIDTH: usize = 4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StackError {
    #[error("invalid instruction `{0}`")]
    InvalidInstruction(String),
    #[error("column {column} does not exist ({columns} columns)")]
    NoSuchColumn { column: usize, columns: usize },
    #[error("cannot move {count} crates from column {column} holding {available}")]
    NotEnoughCrates {
        column: usize,
        count: usize,
        available: usize,
    },
}

/// A crate symbol and the 0-based column it was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionalRecord {
    pub symbol: char,
    pub column: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    InBrackets,
    OutsideBrackets,
}

/// Lazy scanner over one diagram row
///
/// Yields a record for every alphabetic character between `[` and `]`. A
/// digit outside brackets marks the label row and ends the scan.
pub struct BracketScanner<'a> {
    chars: std::iter::Enumerate<std::str::Chars<'a>>,
    state: ScanState,
    column: usize,
    done: bool,
}

/// Scan one diagram row. Malformed rows simply yield fewer records.
pub fn scan_crate_row(line: &str) -> BracketScanner<'_> {
    BracketScanner {
        chars: line.chars().enumerate(),
        state: ScanState::OutsideBrackets,
        column: 0,
        done: false,
    }
}

impl Iterator for BracketScanner<'_> {
    type Item = PositionalRecord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        for (offset, ch) in self.chars.by_ref() {
            let position = offset + 1;
            match (self.state, ch) {
                (_, '[') => self.state = ScanState::InBrackets,
                (_, ']') => self.state = ScanState::OutsideBrackets,
                (ScanState::InBrackets, c) if c.is_alphabetic() => {
                    return Some(PositionalRecord {
                        symbol: c,
                        column: self.column,
                    });
                }
                (ScanState::OutsideBrackets, c) if c.is_ascii_digit() => {
                    self.done = true;
                    return None;
                }
                (ScanState::OutsideBrackets, ' ') if position % COLUMN_WIDTH == 0 => {
                    self.column += 1;
                }
                _ => {}
            }
        }
        self.done = true;
        None
    }
}

/// One `move N from A to B` step, stored 0-based
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub count: usize,
    pub source: usize,
    pub destination: usize,
}

impl FromStr for Instruction {
    type Err = StackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || StackError::InvalidInstruction(s.to_string());

        let rest = s.trim().strip_prefix("move ").ok_or_else(invalid)?;
        let (count, rest) = rest.split_once(" from ").ok_or_else(invalid)?;
        let (source, destination) = rest.split_once(" to ").ok_or_else(invalid)?;

        let count: usize = count.trim().parse().map_err(|_| invalid())?;
        let source: usize = source.trim().parse().map_err(|_| invalid())?;
        let destination: usize = destination.trim().parse().map_err(|_| invalid())?;
        if count == 0 || source == 0 || destination == 0 {
            return Err(invalid());
        }

        Ok(Instruction {
            count,
            source: source - 1,
            destination: destination - 1,
        })
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "move {} from {} to {}",
            self.count,
            self.source + 1,
            self.destination + 1
        )
    }
}

/// Stack columns, each ordered bottom to top
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stacks {
    columns: Vec<Vec<char>>,
}

impl Stacks {
    pub fn new(columns: Vec<Vec<char>>) -> Self {
        Self { columns }
    }

    /// Build columns from records collected top row first, as the diagram is read.
    pub fn from_rows(records: &[PositionalRecord]) -> Self {
        let count = records.iter().map(|r| r.column + 1).max().unwrap_or(0);
        let mut columns = vec![Vec::new(); count];
        for record in records.iter().rev() {
            columns[record.column].push(record.symbol);
        }
        Self { columns }
    }

    pub fn columns(&self) -> &[Vec<char>] {
        &self.columns
    }

    pub fn total_crates(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }

    /// Top crate of every non-empty column, left to right
    pub fn top_symbols(&self) -> String {
        self.columns.iter().filter_map(|c| c.last()).collect()
    }

    fn check(&self, instruction: &Instruction) -> Result<(), StackError> {
        let columns = self.columns.len();
        for column in [instruction.source, instruction.destination] {
            if column >= columns {
                return Err(StackError::NoSuchColumn {
                    column: column + 1,
                    columns,
                });
            }
        }
        let available = self.columns[instruction.source].len();
        if available < instruction.count {
            return Err(StackError::NotEnoughCrates {
                column: instruction.source + 1,
                count: instruction.count,
                available,
            });
        }
        Ok(())
    }

    /// Move the top `count` crates as one block, keeping their order.
    pub fn apply_bulk(&mut self, instruction: &Instruction) -> Result<(), StackError> {
        self.check(instruction)?;
        let source = &mut self.columns[instruction.source];
        let moved = source.split_off(source.len() - instruction.count);
        self.columns[instruction.destination].extend(moved);
        Ok(())
    }

    /// Move `count` crates one at a time, which reverses their order.
    pub fn apply_one_by_one(&mut self, instruction: &Instruction) -> Result<(), StackError> {
        self.check(instruction)?;
        for _ in 0..instruction.count {
            if let Some(symbol) = self.columns[instruction.source].pop() {
                self.columns[instruction.destination].push(symbol);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample() -> Stacks {
        Stacks::new(vec![vec!['Z', 'N'], vec!['M', 'C', 'D'], vec!['P']])
    }

    #[test]
    fn line_without_brackets_yields_nothing() {
        assert_eq!(scan_crate_row("").count(), 0);
        assert_eq!(scan_crate_row("            ").count(), 0);
        assert_eq!(scan_crate_row("move 1 from 2 to 1").count(), 0);
    }

    #[test]
    fn label_row_stops_the_scan() {
        assert_eq!(scan_crate_row(" 1   2   3 ").count(), 0);
    }

    #[test]
    fn scans_full_row() {
        let records: Vec<_> = scan_crate_row("[Z] [M] [P]").collect();
        assert_eq!(
            records,
            vec![
                PositionalRecord { symbol: 'Z', column: 0 },
                PositionalRecord { symbol: 'M', column: 1 },
                PositionalRecord { symbol: 'P', column: 2 },
            ]
        );
    }

    #[test]
    fn leading_gaps_advance_the_column() {
        let records: Vec<_> = scan_crate_row("    [D]    ").collect();
        assert_eq!(records, vec![PositionalRecord { symbol: 'D', column: 1 }]);

        let records: Vec<_> = scan_crate_row("        [Q] [R]").collect();
        let columns: Vec<_> = records.iter().map(|r| r.column).collect();
        assert_eq!(columns, vec![2, 3]);
    }

    #[test]
    fn builds_columns_bottom_to_top() {
        let rows = ["    [D]    ", "[N] [C]    ", "[Z] [M] [P]"];
        let records: Vec<_> = rows.iter().flat_map(|row| scan_crate_row(row)).collect();
        assert_eq!(Stacks::from_rows(&records), sample());
    }

    #[test]
    fn parses_instruction() {
        let instruction: Instruction = "move 3 from 1 to 9".parse().unwrap();
        assert_eq!(
            instruction,
            Instruction {
                count: 3,
                source: 0,
                destination: 8
            }
        );
        assert_eq!(instruction.to_string(), "move 3 from 1 to 9");
    }

    #[test]
    fn rejects_bad_instructions() {
        for bad in [
            "move 0 from 1 to 2",
            "move 1 from 0 to 2",
            "move x from 1 to 2",
            "move 1 to 2",
            "shift 1 from 1 to 2",
        ] {
            assert!(
                matches!(bad.parse::<Instruction>(), Err(StackError::InvalidInstruction(_))),
                "{bad}"
            );
        }
    }

    #[test]
    fn move_one_from_two_to_one() {
        let mut stacks = sample();
        stacks
            .apply_bulk(&"move 1 from 2 to 1".parse().unwrap())
            .unwrap();
        assert_eq!(stacks.columns()[0], vec!['Z', 'N', 'D']);
        assert_eq!(stacks.columns()[1], vec!['M', 'C']);
    }

    #[test]
    fn bulk_keeps_order_one_by_one_reverses() {
        let instruction = Instruction {
            count: 3,
            source: 1,
            destination: 2,
        };

        let mut bulk = sample();
        bulk.apply_bulk(&instruction).unwrap();
        assert_eq!(bulk.columns()[2], vec!['P', 'M', 'C', 'D']);

        let mut single = sample();
        single.apply_one_by_one(&instruction).unwrap();
        assert_eq!(single.columns()[2], vec!['P', 'D', 'C', 'M']);
    }

    #[test]
    fn invalid_moves_leave_stacks_untouched() {
        let mut stacks = sample();
        let too_many = Instruction {
            count: 4,
            source: 1,
            destination: 0,
        };
        assert_eq!(
            stacks.apply_bulk(&too_many),
            Err(StackError::NotEnoughCrates {
                column: 2,
                count: 4,
                available: 3
            })
        );
        let missing = Instruction {
            count: 1,
            source: 0,
            destination: 5,
        };
        assert!(matches!(
            stacks.apply_one_by_one(&missing),
            Err(StackError::NoSuchColumn { column: 6, .. })
        ));
        assert_eq!(stacks, sample());
    }

    #[test]
    fn top_symbols_skips_empty_columns() {
        let stacks = Stacks::new(vec![vec!['A'], vec![], vec!['B', 'C']]);
        assert_eq!(stacks.top_symbols(), "AC");
    }

    proptest! {
        #[test]
        fn scanned_columns_start_at_zero_and_never_decrease(
            cells in prop::collection::vec(prop::option::of(prop::char::range('A', 'Z')), 1..10)
        ) {
            let line = cells
                .iter()
                .map(|cell| match cell {
                    Some(c) => format!("[{c}]"),
                    None => "   ".to_string(),
                })
                .collect::<Vec<_>>()
                .join(" ");

            let records: Vec<_> = scan_crate_row(&line).collect();
            let expected: Vec<_> = cells
                .iter()
                .enumerate()
                .filter_map(|(column, cell)| cell.map(|symbol| PositionalRecord { symbol, column }))
                .collect();
            prop_assert_eq!(&records, &expected);
            prop_assert!(records.windows(2).all(|w| w[0].column <= w[1].column));
        }

        #[test]
        fn bulk_move_preserves_order_and_total(
            columns in prop::collection::vec(prop::collection::vec(prop::char::range('A', 'Z'), 0..8), 2..6),
            source_seed in any::<usize>(),
            destination_seed in any::<usize>(),
            count_seed in any::<usize>(),
        ) {
            let source = source_seed % columns.len();
            let destination = destination_seed % columns.len();
            prop_assume!(source != destination && !columns[source].is_empty());
            let count = count_seed % columns[source].len() + 1;

            let mut stacks = Stacks::new(columns.clone());
            let before = stacks.total_crates();
            stacks.apply_bulk(&Instruction { count, source, destination }).unwrap();

            prop_assert_eq!(stacks.total_crates(), before);
            let moved = &columns[source][columns[source].len() - count..];
            let landed = &stacks.columns()[destination][columns[destination].len()..];
            prop_assert_eq!(landed, moved);
        }
    }
}
