// src/config/model.rs

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::config::layout::ProjectLayout;
use crate::types::LayoutKind;

/// `Chores.toml` as read from disk.
///
/// ```toml
/// [project]
/// name = "frobnicator"
///
/// [layout]
/// kind = "flat"
/// testdir = "tests"
///
/// [clean]
/// patterns = ["**/*.orig", "coverage/"]
/// excludes = ["fixtures/"]
///
/// [lint]
/// command = "pylint"
/// args = ["--jobs=2"]
/// patterns = ["**/*.py"]
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub project: ProjectSection,

    #[serde(default)]
    pub layout: LayoutSection,

    #[serde(default)]
    pub clean: CleanSection,

    #[serde(default)]
    pub lint: LintSection,
}

/// `[project]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProjectSection {
    /// Defaults to the name of the project root directory.
    #[serde(default)]
    pub name: Option<String>,
}

/// `[layout]` section. Unset fields fall back to the chosen preset.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct LayoutSection {
    #[serde(default)]
    pub kind: Option<LayoutKind>,

    #[serde(default)]
    pub srcdir: Option<String>,

    #[serde(default)]
    pub testdir: Option<String>,
}

/// `[clean]` section: project-specific additions to the `clean` chore.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct CleanSection {
    /// Extra globs that are always removed.
    #[serde(default)]
    pub patterns: Vec<String>,

    /// Globs that are never removed (and, for `dir/` specs, never scanned).
    #[serde(default)]
    pub excludes: Vec<String>,
}

/// `[lint]` section: the static-analysis tool run by the `check` chore.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LintSection {
    #[serde(default = "default_lint_command")]
    pub command: String,

    /// Extra arguments placed before the file names.
    #[serde(default)]
    pub args: Vec<String>,

    /// Globs selecting files below the source and test directories.
    #[serde(default = "default_lint_patterns")]
    pub patterns: Vec<String>,

    /// Globs selecting scripts in the project root.
    #[serde(default = "default_lint_root_patterns")]
    pub root_patterns: Vec<String>,
}

fn default_lint_command() -> String {
    "pylint".to_string()
}

fn default_lint_patterns() -> Vec<String> {
    vec!["**/*.py".to_string()]
}

fn default_lint_root_patterns() -> Vec<String> {
    vec!["*.py".to_string()]
}

impl Default for LintSection {
    fn default() -> Self {
        Self {
            command: default_lint_command(),
            args: Vec::new(),
            patterns: default_lint_patterns(),
            root_patterns: default_lint_root_patterns(),
        }
    }
}

/// Values given on the command line; they win over everything else.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub layout: Option<LayoutKind>,
    pub srcdir: Option<String>,
    pub testdir: Option<String>,
}

/// Fully resolved configuration for one invocation.
///
/// Built once by the loader and passed to the chores explicitly.
#[derive(Debug, Clone)]
pub struct ChoresConfig {
    pub project_root: PathBuf,
    pub project_name: String,
    pub layout: ProjectLayout,
    pub clean: CleanSection,
    pub lint: LintSection,
}

impl ChoresConfig {
    /// Construct without validation; see `ChoresConfig::resolve`.
    pub fn new_unchecked(
        project_root: PathBuf,
        project_name: String,
        layout: ProjectLayout,
        clean: CleanSection,
        lint: LintSection,
    ) -> Self {
        Self {
            project_root,
            project_name,
            layout,
            clean,
            lint,
        }
    }

    pub fn rootjoin<P: AsRef<Path>>(&self, rel: P) -> PathBuf {
        self.project_root.join(rel)
    }

    pub fn srcdir_path(&self) -> PathBuf {
        self.rootjoin(&self.layout.srcdir)
    }

    pub fn testdir_path(&self) -> PathBuf {
        self.rootjoin(&self.layout.testdir)
    }
}
