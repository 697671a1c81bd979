//! Parsing and data-model helpers shared by the solutions

pub mod crate_stacks;
pub mod fs_tree;
pub mod priority;
