// src/chores/mod.rs

//! The reusable project chores built on top of [`crate::antglob`].

pub mod check;
pub mod clean;

pub use check::{
    collect_lint_files, is_pylint, judge_lint_exit, lint_command, pylint_message_types, run_check,
    CheckOptions, PYLINT_RCFILES,
};
pub use clean::{clean_patterns, run_clean, CleanOptions, VENV_DIRS};
