//! Advent of Code 2022 solutions with automatic registration
//!
//! [`utils`] holds the parsing core shared by the solvers: the crate-diagram
//! scanner and stack replay, the filesystem tree rebuilt from a terminal
//! transcript, and rucksack item priorities.
//!
//! Each solution under `my_solutions` uses the `AutoRegisterSolver` derive
//! macro, so linking this crate is enough for
//! `SolverRegistryBuilder::register_all_plugins` to find it.

pub mod utils;

#[cfg(feature = "my-solutions")]
pub mod my_solutions;
