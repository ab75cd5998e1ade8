// src/chores/check.rs

//! Static source checks: collect the files to lint and run the linter.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::antglob::{excludes, includes, FileSet, Pattern};
use crate::config::ChoresConfig;
use crate::errors::{ChoresError, Result};
use crate::exec::{run_command, CommandOutcome, CommandSpec};
use crate::fs::FileSystem;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckOptions {
    /// Do not check test modules.
    pub skip_tests: bool,
    /// Do not check scripts in the project root.
    pub skip_root: bool,
    /// Ask pylint for its extended report.
    pub reports: bool,
}

/// Candidate pylint configuration files, relative to the project root.
/// The first one present is passed as `--rcfile`.
pub const PYLINT_RCFILES: &[&str] = &[
    ".pylintrc",
    "pylint.rc",
    "pylint.cfg",
    "project.d/pylint.cfg",
];

/// Message categories encoded in the low bits of pylint's exit status.
const PYLINT_MESSAGE_BITS: &[(i32, &str)] = &[
    (1, "fatal"),
    (2, "error"),
    (4, "warning"),
    (8, "refactor"),
    (16, "convention"),
];

const PYLINT_FAILURE_MASK: i32 = 1 | 2;
const PYLINT_USAGE_ERROR: i32 = 32;

/// Gather lint targets as root-relative paths.
///
/// - files below the source directory matching `[lint].patterns`, leaving
///   out the test directory when it is nested inside and tests are skipped;
/// - files below the test directory matching `[lint].patterns`;
/// - root-level scripts matching `[lint].root_patterns`.
///
/// A flat layout has no separate source walk; its packages are covered by
/// the root patterns or must be listed explicitly.
pub fn collect_lint_files(
    fs: Arc<dyn FileSystem>,
    cfg: &ChoresConfig,
    opts: &CheckOptions,
) -> Result<BTreeSet<String>> {
    let srcdir = normalize_dir(&cfg.layout.srcdir);
    let testdir = normalize_dir(&cfg.layout.testdir);
    let mut names = BTreeSet::new();

    if srcdir != "." {
        let mut patterns = compile_all(&cfg.lint.patterns)?;
        if opts.skip_tests {
            if let Some(nested) = testdir.strip_prefix(&format!("{srcdir}/")) {
                patterns.push(excludes(&format!("{nested}/"))?);
            }
        }
        let fileset = FileSet::with_fs(cfg.srcdir_path(), patterns, Arc::clone(&fs));
        for rel in fileset.iter() {
            names.insert(format!("{srcdir}/{}", rel?));
        }
    }

    if !opts.skip_tests {
        let fileset = FileSet::with_fs(
            cfg.testdir_path(),
            compile_all(&cfg.lint.patterns)?,
            Arc::clone(&fs),
        );
        for rel in fileset.iter() {
            names.insert(format!("{testdir}/{}", rel?));
        }
    }

    if !opts.skip_root {
        let fileset = FileSet::with_fs(
            cfg.project_root.clone(),
            compile_all(&cfg.lint.root_patterns)?,
            Arc::clone(&fs),
        );
        for rel in fileset.iter() {
            names.insert(rel?);
        }
    }

    Ok(names)
}

/// The linter invocation for `files`.
///
/// For pylint, `--reports=y|n` and the first rcfile found in the project
/// root are appended after the files.
pub fn lint_command(
    fs: &dyn FileSystem,
    cfg: &ChoresConfig,
    opts: &CheckOptions,
    files: &BTreeSet<String>,
) -> CommandSpec {
    let cmd = CommandSpec::new(cfg.lint.command.clone())
        .args(cfg.lint.args.iter().cloned())
        .args(files.iter().cloned());
    if !is_pylint(&cfg.lint.command) {
        return cmd;
    }

    let reports = format!("--reports={}", if opts.reports { "y" } else { "n" });
    let rcfile = PYLINT_RCFILES
        .iter()
        .find(|name| fs.exists(&cfg.rootjoin(name)))
        .map(|name| format!("--rcfile={name}"));
    cmd.args(std::iter::once(reports).chain(rcfile))
}

/// Whether `command` runs pylint, judged by its file name.
pub fn is_pylint(command: &str) -> bool {
    Path::new(command)
        .file_stem()
        .is_some_and(|stem| stem == "pylint")
}

/// Names of the message categories set in a pylint exit status.
pub fn pylint_message_types(code: i32) -> Vec<&'static str> {
    PYLINT_MESSAGE_BITS
        .iter()
        .filter(|(bit, _)| code & bit != 0)
        .map(|(_, name)| *name)
        .collect()
}

/// Decide whether a failed linter run fails the check.
///
/// Any non-zero exit fails, except for pylint: it only fails on fatal or
/// error messages or a usage error. Warning, refactor and convention
/// messages are reported and let the check pass.
pub fn judge_lint_exit(cmd: &CommandSpec, code: i32) -> Result<()> {
    let failed = || ChoresError::CommandFailed {
        cmd: cmd.program.clone(),
        code,
    };
    // Negative codes mean the process was killed.
    if !is_pylint(&cmd.program) || code < 0 {
        return Err(failed());
    }

    if code & PYLINT_USAGE_ERROR != 0 {
        error!("Usage error, bad arguments in '{}'?!", cmd);
        return Err(failed());
    }
    warn!(
        "Some messages of type {} issued by pylint.",
        pylint_message_types(code).join(", ")
    );
    if code & PYLINT_FAILURE_MASK != 0 {
        error!("Exiting due to fatal / error message.");
        return Err(failed());
    }
    Ok(())
}

/// Collect lint targets and run the configured linter over them.
pub async fn run_check(
    fs: Arc<dyn FileSystem>,
    cfg: &ChoresConfig,
    opts: &CheckOptions,
    dry_run: bool,
) -> Result<()> {
    let files = collect_lint_files(Arc::clone(&fs), cfg, opts)?;
    if files.is_empty() {
        warn!("no files to check");
        return Ok(());
    }

    let cmd = lint_command(fs.as_ref(), cfg, opts, &files);
    if dry_run {
        println!("{cmd}");
        return Ok(());
    }

    match run_command(&cmd, &cfg.project_root).await? {
        CommandOutcome::Success => {
            info!("OK - No problems found by {}.", cfg.lint.command);
            Ok(())
        }
        CommandOutcome::Failed(code) => judge_lint_exit(&cmd, code),
    }
}

fn compile_all(specs: &[String]) -> Result<Vec<Pattern>> {
    specs.iter().map(|spec| includes(spec)).collect()
}

fn normalize_dir(dir: &str) -> String {
    let trimmed = dir.trim_end_matches('/');
    let trimmed = trimmed.strip_prefix("./").unwrap_or(trimmed);
    if trimmed.is_empty() {
        ".".to_string()
    } else {
        trimmed.to_string()
    }
}
