// src/antglob/fileset.rs

//! Ant-style file selection over a directory tree.

use std::collections::{BTreeSet, HashSet, VecDeque};
use std::fmt;
use std::ops::{BitAnd, BitOr};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, trace};

use crate::antglob::pattern::{includes, Pattern};
use crate::errors::Result;
use crate::fs::{FileSystem, RealFileSystem};

/// Ant style file matching.
///
/// Yields every root-relative path the ordered patterns end up including.
///
/// Directory specifiers:
/// - `**` matches zero or more directories.
/// - `*` matches any directory name.
/// - `/` path separator; a trailing `/` makes the pattern apply to
///   directories instead of files.
///
/// File specifiers:
/// - `*` glob style wildcard.
/// - `[chars]`, `[^chars]` character sets.
///
/// Examples:
/// - `**/*.py` recursively match all python files.
/// - `foo/**/*.py` recursively match all python files in the `foo/` directory.
/// - `*.py` match all the python files in the current directory.
/// - `*/*.txt` match all the text files in child directories.
/// - `**/__pycache__/` match every `__pycache__` directory.
///
/// Among the patterns that apply to a path, the last one decides. A path no
/// pattern applies to is not yielded. A directory that is decisively
/// excluded is not descended into. Symlinks to directories are matched as
/// directories but never followed.
///
/// The filesystem is read when iterating, not when constructing; each
/// iteration is a fresh walk.
#[derive(Clone)]
pub struct FileSet {
    root: PathBuf,
    patterns: Vec<Pattern>,
    fs: Arc<dyn FileSystem>,
}

impl fmt::Debug for FileSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileSet")
            .field("root", &self.root)
            .field("patterns", &self.patterns)
            .finish_non_exhaustive()
    }
}

impl FileSet {
    pub fn new(root: impl Into<PathBuf>, patterns: Vec<Pattern>) -> Self {
        Self::with_fs(root, patterns, Arc::new(RealFileSystem))
    }

    pub fn with_fs(
        root: impl Into<PathBuf>,
        patterns: Vec<Pattern>,
        fs: Arc<dyn FileSystem>,
    ) -> Self {
        Self {
            root: root.into(),
            patterns,
            fs,
        }
    }

    /// Build a file set from bare glob strings, all of them inclusive.
    pub fn from_globs<S: AsRef<str>>(root: impl Into<PathBuf>, globs: &[S]) -> Result<Self> {
        let patterns = globs
            .iter()
            .map(|g| includes(g.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(root, patterns))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Check patterns in order; the last one that applies to `path` wins.
    ///
    /// `None` means no pattern applied at all.
    pub fn included(&self, path: &str, is_dir: bool) -> Option<bool> {
        self.patterns
            .iter()
            .rev()
            .find(|p| p.is_dir() == is_dir && p.matches(path))
            .map(Pattern::inclusive)
    }

    /// Walk the tree, yielding root-relative paths.
    pub fn iter(&self) -> Walk<'_> {
        Walk::new(self, String::new())
    }

    /// Like [`FileSet::iter`], but every path is prefixed with the root.
    pub fn iter_with_root(&self) -> Walk<'_> {
        let root = self.root.to_string_lossy().replace('\\', "/");
        let lead = format!("{}/", root.trim_end_matches('/'));
        Walk::new(self, lead)
    }

    /// Materialise one full walk.
    pub fn to_set(&self) -> Result<BTreeSet<String>> {
        self.iter().collect()
    }

    pub fn union<O: PathSource + ?Sized>(&self, other: &O) -> Result<BTreeSet<String>> {
        let mut result = self.to_set()?;
        result.extend(other.paths()?);
        Ok(result)
    }

    pub fn intersection<O: PathSource + ?Sized>(&self, other: &O) -> Result<BTreeSet<String>> {
        let ours = self.to_set()?;
        let theirs = other.paths()?;
        Ok(ours.intersection(&theirs).cloned().collect())
    }
}

impl<'a> IntoIterator for &'a FileSet {
    type Item = Result<String>;
    type IntoIter = Walk<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy depth-first walk of a [`FileSet`].
///
/// Within one directory, subdirectories are reported before files and both
/// are visited in name order. Directory results carry a trailing slash.
/// Symlinked directories are reported but not entered.
pub struct Walk<'a> {
    set: &'a FileSet,
    lead: String,
    /// Directories still to be listed, with their root-relative prefix.
    pending: Vec<(PathBuf, String)>,
    ready: VecDeque<String>,
}

impl<'a> Walk<'a> {
    fn new(set: &'a FileSet, lead: String) -> Self {
        let mut pending = Vec::new();
        if set.fs.is_dir(&set.root) {
            pending.push((set.root.clone(), String::new()));
        } else {
            debug!(root = ?set.root, "file set root is not a directory, nothing to walk");
        }

        Self {
            set,
            lead,
            pending,
            ready: VecDeque::new(),
        }
    }

    fn scan(&mut self, dir: &Path, prefix: &str) -> Result<()> {
        let set = self.set;
        let fs = &set.fs;

        let mut entries: Vec<(String, PathBuf)> = fs
            .read_dir(dir)?
            .into_iter()
            .filter_map(|path| {
                let name = path.file_name()?.to_string_lossy().into_owned();
                Some((name, path))
            })
            .collect();
        entries.sort();

        let (dirs, files): (Vec<_>, Vec<_>) =
            entries.into_iter().partition(|(_, path)| fs.is_dir(path));

        let mut descend = Vec::with_capacity(dirs.len());
        for (name, path) in dirs {
            let rel = join_rel(prefix, &name);
            let vote = set.included(&rel, true);
            if vote == Some(true) {
                self.ready.push_back(format!("{}{}/", self.lead, rel));
            }
            if vote == Some(false) {
                trace!(dir = %rel, "pruning excluded directory");
            } else if fs.is_symlink(&path) {
                trace!(dir = %rel, "not following symlinked directory");
            } else {
                descend.push((path, rel));
            }
        }

        for (name, _) in files {
            let rel = join_rel(prefix, &name);
            if set.included(&rel, false) == Some(true) {
                self.ready.push_back(format!("{}{}", self.lead, rel));
            }
        }

        // Reversed so the first subdirectory is listed next.
        self.pending.extend(descend.into_iter().rev());
        Ok(())
    }
}

impl Iterator for Walk<'_> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(path) = self.ready.pop_front() {
                return Some(Ok(path));
            }
            let (dir, prefix) = self.pending.pop()?;
            if let Err(e) = self.scan(&dir, &prefix) {
                return Some(Err(e));
            }
        }
    }
}

fn join_rel(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}/{name}")
    }
}

/// Anything that can be materialised into a set of matched paths, so that
/// file sets combine with each other and with plain path collections.
pub trait PathSource {
    fn paths(&self) -> Result<BTreeSet<String>>;
}

impl PathSource for FileSet {
    fn paths(&self) -> Result<BTreeSet<String>> {
        self.to_set()
    }
}

impl PathSource for BTreeSet<String> {
    fn paths(&self) -> Result<BTreeSet<String>> {
        Ok(self.clone())
    }
}

impl PathSource for HashSet<String> {
    fn paths(&self) -> Result<BTreeSet<String>> {
        Ok(self.iter().cloned().collect())
    }
}

impl<S: AsRef<str>> PathSource for [S] {
    fn paths(&self) -> Result<BTreeSet<String>> {
        Ok(self.iter().map(|s| s.as_ref().to_string()).collect())
    }
}

impl<S: AsRef<str>> PathSource for Vec<S> {
    fn paths(&self) -> Result<BTreeSet<String>> {
        self.as_slice().paths()
    }
}

impl BitOr<&FileSet> for &FileSet {
    type Output = Result<BTreeSet<String>>;

    fn bitor(self, rhs: &FileSet) -> Self::Output {
        self.union(rhs)
    }
}

impl BitAnd<&FileSet> for &FileSet {
    type Output = Result<BTreeSet<String>>;

    fn bitand(self, rhs: &FileSet) -> Self::Output {
        self.intersection(rhs)
    }
}

impl BitOr<&BTreeSet<String>> for &FileSet {
    type Output = Result<BTreeSet<String>>;

    fn bitor(self, rhs: &BTreeSet<String>) -> Self::Output {
        self.union(rhs)
    }
}

impl BitAnd<&BTreeSet<String>> for &FileSet {
    type Output = Result<BTreeSet<String>>;

    fn bitand(self, rhs: &BTreeSet<String>) -> Self::Output {
        self.intersection(rhs)
    }
}

impl BitOr<&FileSet> for BTreeSet<String> {
    type Output = Result<BTreeSet<String>>;

    fn bitor(mut self, rhs: &FileSet) -> Self::Output {
        self.extend(rhs.to_set()?);
        Ok(self)
    }
}

impl BitAnd<&FileSet> for BTreeSet<String> {
    type Output = Result<BTreeSet<String>>;

    fn bitand(self, rhs: &FileSet) -> Self::Output {
        let theirs = rhs.to_set()?;
        Ok(self.into_iter().filter(|p| theirs.contains(p)).collect())
    }
}
