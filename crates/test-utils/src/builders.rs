#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use chores::config::{ChoresConfig, ConfigOverrides, RawConfigFile};
use chores::fs::mock::MockFileSystem;
use chores::fs::FileSystem;
use chores::types::LayoutKind;
use tempfile::TempDir;

/// Files of the reference tree used throughout the glob tests.
///
/// ```text
/// ./foo/bar/baz/...
/// ./foo/bar/baz/three
/// ./foo/bar/baz/three.py
/// ./foo/bar/two
/// ./foo/bar/two.py
/// ./foo/one
/// ./foo/one.py
/// ./zero
/// ./zero.py
/// ```
pub const REFERENCE_FILES: &[&str] = &[
    "zero.py",
    "zero",
    "foo/one.py",
    "foo/one",
    "foo/bar/two.py",
    "foo/bar/two",
    "foo/bar/baz/three.py",
    "foo/bar/baz/three",
    "foo/bar/baz/...",
];

pub const ALL_THE_PIES: &[&str] = &[
    "foo/bar/baz/three.py",
    "foo/bar/two.py",
    "foo/one.py",
    "zero.py",
];

/// Builder for an on-disk directory tree inside a temporary directory.
pub struct TreeBuilder {
    dir: TempDir,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("creating temp dir"),
        }
    }

    /// The reference tree from [`REFERENCE_FILES`].
    pub fn reference() -> Self {
        REFERENCE_FILES
            .iter()
            .fold(Self::new(), |tree, path| tree.file(path))
    }

    pub fn file(self, rel: &str) -> Self {
        self.file_with(rel, "")
    }

    pub fn file_with(self, rel: &str, contents: &str) -> Self {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("creating parent dirs");
        }
        fs::write(&path, contents).expect("writing file");
        self
    }

    pub fn dir(self, rel: &str) -> Self {
        fs::create_dir_all(self.dir.path().join(rel)).expect("creating dir");
        self
    }

    /// Keep the temporary directory alive for the returned handle's lifetime.
    pub fn build(self) -> Tree {
        Tree { dir: self.dir }
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A built on-disk tree; removed when dropped.
pub struct Tree {
    dir: TempDir,
}

impl Tree {
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }
}

/// In-memory counterpart of [`TreeBuilder`].
pub fn mock_tree(files: &[&str]) -> MockFileSystem {
    let fs = MockFileSystem::new();
    for path in files {
        if let Some(dir) = path.strip_suffix('/') {
            fs.add_dir(dir);
        } else {
            fs.add_file(path, Vec::new());
        }
    }
    fs
}

/// Builder for `ChoresConfig` to simplify test setup.
pub struct ConfigBuilder {
    raw: RawConfigFile,
    overrides: ConfigOverrides,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            raw: RawConfigFile::default(),
            overrides: ConfigOverrides::default(),
        }
    }

    pub fn layout(mut self, kind: LayoutKind) -> Self {
        self.raw.layout.kind = Some(kind);
        self
    }

    pub fn srcdir(mut self, dir: &str) -> Self {
        self.raw.layout.srcdir = Some(dir.to_string());
        self
    }

    pub fn testdir(mut self, dir: &str) -> Self {
        self.raw.layout.testdir = Some(dir.to_string());
        self
    }

    pub fn clean_pattern(mut self, spec: &str) -> Self {
        self.raw.clean.patterns.push(spec.to_string());
        self
    }

    pub fn clean_exclude(mut self, spec: &str) -> Self {
        self.raw.clean.excludes.push(spec.to_string());
        self
    }

    pub fn lint_command(mut self, cmd: &str) -> Self {
        self.raw.lint.command = cmd.to_string();
        self
    }

    pub fn lint_arg(mut self, arg: &str) -> Self {
        self.raw.lint.args.push(arg.to_string());
        self
    }

    pub fn override_layout(mut self, kind: LayoutKind) -> Self {
        self.overrides.layout = Some(kind);
        self
    }

    pub fn build_with(self, root: impl Into<PathBuf>, fs: &dyn FileSystem) -> ChoresConfig {
        ChoresConfig::resolve(self.raw, root.into(), fs, &self.overrides)
            .expect("Failed to build valid config from builder")
    }

    /// Resolve against an empty mock filesystem rooted at `root`.
    pub fn build(self, root: impl Into<PathBuf>) -> ChoresConfig {
        let fs = MockFileSystem::new();
        self.build_with(root, &fs)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
