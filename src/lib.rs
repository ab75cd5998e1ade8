// src/lib.rs

pub mod antglob;
pub mod chores;
pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod types;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::antglob::{excludes, includes, FileSet, Pattern};
use crate::chores::{clean_patterns, run_check, run_clean, CheckOptions, CleanOptions};
use crate::cli::{CliArgs, Command};
use crate::config::{load_project, ChoresConfig, ConfigOverrides};
use crate::fs::{FileSystem, RealFileSystem};

/// High-level entry point used by `main.rs`.
///
/// Resolves the project configuration once and hands it to the selected
/// chore.
pub async fn run(args: CliArgs) -> Result<()> {
    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);

    let start = match &args.root {
        Some(root) => std::path::absolute(root)
            .with_context(|| format!("resolving project root {:?}", root))?,
        None => std::env::current_dir().context("determining current directory")?,
    };
    let overrides = ConfigOverrides {
        layout: args.layout,
        ..ConfigOverrides::default()
    };
    let cfg = load_project(fs.as_ref(), &start, args.config.as_deref(), &overrides)?;

    match &args.command {
        Command::Clean(clean) => {
            info!("Cleaning up project files");
            let opts = CleanOptions::from(clean);
            let patterns = clean_patterns(&opts, &cfg)?;
            let removed = run_clean(fs, &cfg.project_root, patterns, clean.dry_run)?;
            info!(count = removed.len(), dry_run = clean.dry_run, "clean finished");
        }
        Command::Ls(ls) => {
            let patterns = parse_cli_patterns(&ls.patterns)?;
            let fileset = FileSet::with_fs(cfg.project_root.clone(), patterns, fs);
            for path in fileset.to_set()? {
                println!("{path}");
            }
        }
        Command::Check(check) => {
            let opts = CheckOptions::from(check);
            run_check(fs, &cfg, &opts, check.dry_run).await?;
        }
        Command::Layout => print_layout(&cfg),
    }

    debug!("chore complete");
    Ok(())
}

/// Turn command-line globs into patterns; a leading `!` marks an exclude.
pub fn parse_cli_patterns(specs: &[String]) -> errors::Result<Vec<Pattern>> {
    specs
        .iter()
        .map(|spec| match spec.strip_prefix('!') {
            Some(rest) => excludes(rest),
            None => includes(spec),
        })
        .collect()
}

/// Print the resolved configuration.
fn print_layout(cfg: &ChoresConfig) {
    println!("chores project '{}'", cfg.project_name);
    println!("  root:    {}", cfg.project_root.display());
    println!("  srcdir:  {} ({})", cfg.layout.srcdir, exists_marker(cfg.srcdir_path()));
    println!("  testdir: {} ({})", cfg.layout.testdir, exists_marker(cfg.testdir_path()));
    println!();

    println!("clean:");
    if !cfg.clean.patterns.is_empty() {
        println!("  patterns: {:?}", cfg.clean.patterns);
    }
    if !cfg.clean.excludes.is_empty() {
        println!("  excludes: {:?}", cfg.clean.excludes);
    }
    println!("lint:");
    println!("  command:       {}", cfg.lint.command);
    println!("  args:          {:?}", cfg.lint.args);
    println!("  patterns:      {:?}", cfg.lint.patterns);
    println!("  root_patterns: {:?}", cfg.lint.root_patterns);
}

fn exists_marker(path: PathBuf) -> &'static str {
    if path.is_dir() { "present" } else { "missing" }
}
