// src/chores/clean.rs

//! House-keeping: remove build artefacts selected by ant-style globs.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::antglob::{excludes, includes, FileSet, Pattern};
use crate::config::ChoresConfig;
use crate::errors::{ChoresError, Result};
use crate::fs::FileSystem;

/// Virtualenv directories that may sit in the project root.
pub const VENV_DIRS: &[&str] = &["bin", "include", "lib", "share", "local", ".venv"];

/// Which optional groups of files to remove.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanOptions {
    /// Documentation build areas.
    pub docs: bool,
    /// Editor backup files (`*~`).
    pub backups: bool,
    /// Compiled bytecode and package metadata.
    pub bytecode: bool,
    /// The `dist` directory.
    pub dist: bool,
    /// Shorthand for docs + backups + bytecode + dist.
    pub all: bool,
    /// An existing virtualenv in the project root.
    pub venv: bool,
    /// The `.tox` directory.
    pub tox: bool,
    /// Additional glob specs, split like a shell command line.
    pub extra: Vec<String>,
}

/// Assemble the ordered include/exclude list for `opts`.
///
/// All includes come before the excludes, so an exclude always wins. Unless
/// virtualenvs are being cleaned, their directories are excluded last, which
/// also keeps the walk out of them.
pub fn clean_patterns(opts: &CleanOptions, cfg: &ChoresConfig) -> Result<Vec<Pattern>> {
    let mut wanted: Vec<String> = vec!["build/".into(), "pip-selfcheck.json".into()];
    let mut unwanted: Vec<String> = vec![
        ".git/".into(),
        ".hg/".into(),
        ".svn/".into(),
        "debian/*/".into(),
    ];

    if opts.docs || opts.all {
        wanted.extend(["docs/_build/".into(), "doc/_build/".into()]);
    }
    if opts.dist || opts.all {
        wanted.push("dist/".into());
    }
    if opts.backups || opts.all {
        wanted.push("**/*~".into());
    }
    if opts.bytecode || opts.all {
        wanted.extend([
            "**/*.py[co]".into(),
            "**/__pycache__/".into(),
            "*.egg-info/".into(),
        ]);
        let srcdir = cfg.layout.srcdir.trim_end_matches('/');
        if srcdir != "." {
            wanted.push(format!("{srcdir}/*.egg-info/"));
        }
    }
    if opts.venv {
        wanted.extend(VENV_DIRS.iter().map(|d| format!("{d}/")));
    }
    if opts.tox {
        wanted.push(".tox/".into());
    } else {
        unwanted.push(".tox/".into());
    }
    for extra in &opts.extra {
        let specs = shlex::split(extra).ok_or_else(|| {
            ChoresError::ConfigError(format!("unbalanced quotes in extra patterns: {extra}"))
        })?;
        wanted.extend(specs);
    }
    wanted.extend(cfg.clean.patterns.iter().cloned());
    unwanted.extend(cfg.clean.excludes.iter().cloned());

    let mut patterns = wanted
        .iter()
        .map(|spec| includes(spec))
        .chain(unwanted.iter().map(|spec| excludes(spec)))
        .collect::<Result<Vec<_>>>()?;

    if !opts.venv {
        for dir in VENV_DIRS {
            patterns.push(excludes(&format!("{dir}/"))?);
        }
    }

    Ok(patterns)
}

/// Remove everything `patterns` selects below `root`.
///
/// Matches are collected before anything is deleted and processed in
/// sorted order, so a directory comes before its contents and entries
/// inside an already-removed directory are skipped. Returns the removed
/// root-relative paths; with `dry_run` nothing is touched.
pub fn run_clean(
    fs: Arc<dyn FileSystem>,
    root: &Path,
    patterns: Vec<Pattern>,
    dry_run: bool,
) -> Result<Vec<String>> {
    let fileset = FileSet::with_fs(root, patterns, Arc::clone(&fs));
    let matches = fileset.to_set()?;

    let mut removed = Vec::with_capacity(matches.len());
    let mut removed_dirs: Vec<String> = Vec::new();

    for name in matches {
        if removed_dirs.iter().any(|dir| name.starts_with(dir.as_str())) {
            debug!(path = %name, "already removed with its parent directory");
            continue;
        }

        info!("rm {}", name);
        let is_dir = name.ends_with('/');
        if !dry_run {
            let path = root.join(name.trim_end_matches('/'));
            if fs.is_symlink(&path) {
                // Only the link goes; its target may live outside the root.
                fs.remove_file(&path)?;
            } else if is_dir {
                fs.remove_dir_all(&path)?;
            } else {
                fs.remove_file(&path)?;
            }
        }
        if is_dir {
            removed_dirs.push(name.clone());
        }
        removed.push(name);
    }

    Ok(removed)
}
