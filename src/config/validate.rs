// src/config/validate.rs

use std::path::{Component, Path, PathBuf};

use crate::antglob::Pattern;
use crate::config::layout::ProjectLayout;
use crate::config::model::{ChoresConfig, ConfigOverrides, RawConfigFile};
use crate::errors::{ChoresError, Result};
use crate::fs::FileSystem;

impl ChoresConfig {
    /// Validate `raw` and merge it into a resolved configuration.
    ///
    /// Precedence, lowest first: layout preset (detected for `auto`), the
    /// config file, then `overrides`.
    pub fn resolve(
        raw: RawConfigFile,
        project_root: PathBuf,
        fs: &dyn FileSystem,
        overrides: &ConfigOverrides,
    ) -> Result<Self> {
        validate_raw_config(&raw)?;

        let kind = overrides.layout.or(raw.layout.kind).unwrap_or_default();
        let preset = ProjectLayout::for_kind(kind, fs, &project_root);
        let layout = ProjectLayout {
            srcdir: overrides
                .srcdir
                .clone()
                .or(raw.layout.srcdir)
                .unwrap_or(preset.srcdir),
            testdir: overrides
                .testdir
                .clone()
                .or(raw.layout.testdir)
                .unwrap_or(preset.testdir),
        };
        validate_layout(&layout)?;

        let project_name = raw
            .project
            .name
            .or_else(|| {
                project_root
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| "project".to_string());

        Ok(ChoresConfig::new_unchecked(
            project_root,
            project_name,
            layout,
            raw.clean,
            raw.lint,
        ))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_lint(cfg)?;
    validate_globs(cfg)?;
    Ok(())
}

fn validate_lint(cfg: &RawConfigFile) -> Result<()> {
    if cfg.lint.command.trim().is_empty() {
        return Err(ChoresError::ConfigError(
            "[lint].command must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_globs(cfg: &RawConfigFile) -> Result<()> {
    let all = cfg
        .clean
        .patterns
        .iter()
        .chain(cfg.clean.excludes.iter())
        .chain(cfg.lint.patterns.iter())
        .chain(cfg.lint.root_patterns.iter());

    for spec in all {
        if spec.is_empty() {
            return Err(ChoresError::ConfigError(
                "glob patterns must not be empty".to_string(),
            ));
        }
        Pattern::new(spec, true)?;
    }
    Ok(())
}

fn validate_layout(layout: &ProjectLayout) -> Result<()> {
    for (key, dir) in [("srcdir", &layout.srcdir), ("testdir", &layout.testdir)] {
        let path = Path::new(dir);
        if dir.is_empty() || path.is_absolute() {
            return Err(ChoresError::ConfigError(format!(
                "[layout].{key} must be a relative path (got '{dir}')"
            )));
        }
        if path.components().any(|c| matches!(c, Component::ParentDir)) {
            return Err(ChoresError::ConfigError(format!(
                "[layout].{key} must stay inside the project root (got '{dir}')"
            )));
        }
    }
    Ok(())
}
