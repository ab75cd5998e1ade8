// src/exec/mod.rs

//! Running external tools (linters and the like) for the chores.

pub mod command;

pub use command::{run_command, CommandOutcome, CommandSpec};
