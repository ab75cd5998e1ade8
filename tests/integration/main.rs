mod error_handling;
mod fs_abstraction;
mod pruning;
