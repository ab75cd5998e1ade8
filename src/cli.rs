// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::chores::{CheckOptions, CleanOptions};
use crate::types::LayoutKind;

/// Command-line arguments for `chores`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "chores",
    version,
    about = "Reusable clean / check chores for software projects.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: the nearest `Chores.toml` in the current directory or above.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Directory to start looking for the project from.
    #[arg(long, value_name = "DIR", global = true)]
    pub root: Option<PathBuf>,

    /// Project layout (auto, src, flat, maven); overrides `[layout].kind`.
    #[arg(long, value_name = "KIND", global = true)]
    pub layout: Option<LayoutKind>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `CHORES_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Perform house-keeping.
    Clean(CleanArgs),
    /// List the files matching ant-style globs (prefix a glob with `!` to exclude).
    Ls(LsArgs),
    /// Perform source code checks with the configured linter.
    Check(CheckArgs),
    /// Print the resolved project configuration.
    Layout,
}

#[derive(Debug, Clone, Args)]
pub struct CleanArgs {
    /// Also clean the documentation build area.
    #[arg(long)]
    pub docs: bool,

    /// Also clean '*~' files etc.
    #[arg(long)]
    pub backups: bool,

    /// Also clean '.pyc', '.pyo', and package metadata.
    #[arg(long)]
    pub bytecode: bool,

    /// Also clean the 'dist' dir.
    #[arg(long)]
    pub dist: bool,

    /// The same as --backups --bytecode --dist --docs.
    #[arg(long)]
    pub all: bool,

    /// Include an existing virtualenv (in '.' or in '.venv').
    #[arg(long)]
    pub venv: bool,

    /// Include '.tox' directory.
    #[arg(long)]
    pub tox: bool,

    /// Any extra patterns, space-separated.
    #[arg(long, value_name = "PATTERNS")]
    pub extra: Vec<String>,

    /// Only report what would be removed.
    #[arg(long)]
    pub dry_run: bool,
}

impl From<&CleanArgs> for CleanOptions {
    fn from(args: &CleanArgs) -> Self {
        CleanOptions {
            docs: args.docs,
            backups: args.backups,
            bytecode: args.bytecode,
            dist: args.dist,
            all: args.all,
            venv: args.venv,
            tox: args.tox,
            extra: args.extra.clone(),
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct LsArgs {
    /// Ordered globs; the last one matching a path decides.
    #[arg(value_name = "PATTERN", required = true)]
    pub patterns: Vec<String>,
}

#[derive(Debug, Clone, Args)]
pub struct CheckArgs {
    /// Do not check test modules.
    #[arg(long)]
    pub skip_tests: bool,

    /// Do not check scripts in project root.
    #[arg(long)]
    pub skip_root: bool,

    /// Create pylint's extended report.
    #[arg(long)]
    pub reports: bool,

    /// Print the linter command instead of running it.
    #[arg(long)]
    pub dry_run: bool,
}

impl From<&CheckArgs> for CheckOptions {
    fn from(args: &CheckArgs) -> Self {
        CheckOptions {
            skip_tests: args.skip_tests,
            skip_root: args.skip_root,
            reports: args.reports,
        }
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
