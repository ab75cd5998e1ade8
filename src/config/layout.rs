// src/config/layout.rs

//! Where a project keeps its sources and tests.

use std::path::Path;

use tracing::debug;

use crate::fs::FileSystem;
use crate::types::LayoutKind;

/// Source and test directories, relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    pub srcdir: String,
    pub testdir: String,
}

impl Default for ProjectLayout {
    fn default() -> Self {
        Self {
            srcdir: "src".to_string(),
            testdir: "src/tests".to_string(),
        }
    }
}

impl ProjectLayout {
    pub fn maven() -> Self {
        Self {
            srcdir: "src/main/python".to_string(),
            testdir: "src/test/python".to_string(),
        }
    }

    /// Everything top-level.
    pub fn flat() -> Self {
        Self {
            srcdir: ".".to_string(),
            testdir: "tests".to_string(),
        }
    }

    /// The preset for `kind`; `Auto` inspects the project root.
    pub fn for_kind(kind: LayoutKind, fs: &dyn FileSystem, root: &Path) -> Self {
        match kind {
            LayoutKind::Auto => Self::detect(fs, root),
            LayoutKind::Src => Self::default(),
            LayoutKind::Flat => Self::flat(),
            LayoutKind::Maven => Self::maven(),
        }
    }

    pub fn detect(fs: &dyn FileSystem, root: &Path) -> Self {
        let layout = if is_maven_layout(fs, root) {
            Self::maven()
        } else if is_flat_layout(fs, root) {
            Self::flat()
        } else {
            Self::default()
        };
        debug!(?root, ?layout, "detected project layout");
        layout
    }
}

/// Maven-like projects have both `src/main/tests` and `src/main/python`.
pub fn is_maven_layout(fs: &dyn FileSystem, root: &Path) -> bool {
    fs.exists(&root.join("src/main/tests")) && fs.exists(&root.join("src/main/python"))
}

/// Flat projects have `tests/` next to a package named like the root
/// directory (dashes become underscores).
pub fn is_flat_layout(fs: &dyn FileSystem, root: &Path) -> bool {
    let Some(name) = root.file_name() else {
        return false;
    };
    let package = name.to_string_lossy().replace('-', "_");
    fs.exists(&root.join("tests")) && fs.exists(&root.join(package).join("__init__.py"))
}
