// Directory pruning, observed through the filesystem seam.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Result};
use chores::antglob::{excludes, includes, FileSet};
use chores::fs::mock::MockFileSystem;
use chores::fs::FileSystem;
use chores_test_utils::builders::{mock_tree, REFERENCE_FILES};
use chores_test_utils::init_tracing;

/// Delegates to a mock, but fails the test as soon as a forbidden
/// directory is listed.
#[derive(Debug)]
struct GuardedFs {
    inner: MockFileSystem,
    forbidden: Vec<PathBuf>,
}

impl GuardedFs {
    fn new(inner: MockFileSystem, forbidden: &[&str]) -> Self {
        Self {
            inner,
            forbidden: forbidden.iter().map(PathBuf::from).collect(),
        }
    }
}

impl FileSystem for GuardedFs {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.inner.read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner.exists(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.inner.is_file(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.inner.is_dir(path)
    }

    fn is_symlink(&self, path: &Path) -> bool {
        self.inner.is_symlink(path)
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let rel = path.strip_prefix(".").unwrap_or(path);
        if self.forbidden.iter().any(|f| rel == f.as_path()) {
            panic!("walk listed pruned directory {:?}", path);
        }
        self.inner.read_dir(path)
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        self.inner.remove_file(path)
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        self.inner.remove_dir_all(path)
    }
}

/// Fails listing of one directory with an error instead of a panic.
#[derive(Debug)]
struct BrokenDirFs {
    inner: MockFileSystem,
    broken: PathBuf,
}

impl FileSystem for BrokenDirFs {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.inner.read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner.exists(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.inner.is_file(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.inner.is_dir(path)
    }

    fn is_symlink(&self, path: &Path) -> bool {
        self.inner.is_symlink(path)
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        if path.ends_with(&self.broken) {
            return Err(anyhow!("permission denied: {:?}", path));
        }
        self.inner.read_dir(path)
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        self.inner.remove_file(path)
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        self.inner.remove_dir_all(path)
    }
}

#[test]
fn pruned_directory_is_never_listed() {
    init_tracing();
    let fs = GuardedFs::new(mock_tree(REFERENCE_FILES), &["foo/bar", "foo/bar/baz"]);
    let set = FileSet::with_fs(
        ".",
        vec![
            includes("**/*").unwrap(),
            excludes("**/bar/**/*").unwrap(),
            excludes("**/bar/").unwrap(),
        ],
        Arc::new(fs),
    );

    let mut result: Vec<String> = set.iter().map(|p| p.unwrap()).collect();
    result.sort();
    assert_eq!(result, vec!["foo/one", "foo/one.py", "zero", "zero.py"]);
}

#[test]
fn venv_like_directories_are_skipped_entirely() {
    let mock = mock_tree(&[
        "setup.py",
        "src/pkg/__init__.py",
        ".venv/lib/python3/site-packages/huge/__init__.py",
        ".git/objects/ab/cdef",
    ]);
    let set = FileSet::with_fs(
        ".",
        vec![
            includes("**/*.py").unwrap(),
            excludes(".venv/").unwrap(),
            excludes(".git/").unwrap(),
        ],
        Arc::new(mock.clone()),
    );

    let result = set.to_set().unwrap();
    assert_eq!(
        result.into_iter().collect::<Vec<_>>(),
        vec!["setup.py", "src/pkg/__init__.py"]
    );

    let listed = mock.listed_dirs();
    assert!(listed.contains(&PathBuf::from("src/pkg")));
    assert!(!listed.iter().any(|d| d.starts_with(".venv") || d.starts_with(".git")));
}

#[test]
fn undecided_directories_are_descended() {
    let mock = mock_tree(&["a/b/c/deep.txt"]);
    let set = FileSet::with_fs(".", vec![includes("**/*.txt").unwrap()], Arc::new(mock.clone()));

    assert_eq!(set.to_set().unwrap().len(), 1);
    assert_eq!(
        mock.listed_dirs(),
        vec![
            PathBuf::from("."),
            PathBuf::from("a"),
            PathBuf::from("a/b"),
            PathBuf::from("a/b/c")
        ]
    );
}

#[test]
fn every_iteration_walks_again() {
    let mock = mock_tree(&["one.txt"]);
    let set = FileSet::with_fs(".", vec![includes("*.txt").unwrap()], Arc::new(mock.clone()));

    assert_eq!(set.to_set().unwrap().len(), 1);
    mock.add_file("two.txt", Vec::new());
    assert_eq!(set.to_set().unwrap().len(), 2);
    assert_eq!(mock.listed_dirs().len(), 2);
}

#[test]
fn listing_errors_propagate_to_the_caller() {
    let fs = BrokenDirFs {
        inner: mock_tree(&["ok.txt", "locked/secret.txt"]),
        broken: PathBuf::from("locked"),
    };
    let set = FileSet::with_fs(".", vec![includes("**/*.txt").unwrap()], Arc::new(fs));

    let results: Vec<_> = set.iter().collect();
    assert!(results.iter().any(|r| matches!(r, Ok(p) if p == "ok.txt")));
    assert!(results.iter().any(|r| r.is_err()));
    assert!(set.to_set().is_err());
}

#[test]
fn symlinked_directories_are_matched_but_not_entered() {
    let mock = mock_tree(&["a/x.py", "outside/__pycache__/m.pyc"]);
    mock.add_symlink("a/loop", "..");
    mock.add_symlink("vendored", "outside");
    let set = FileSet::with_fs(
        ".",
        vec![
            includes("**/*.py").unwrap(),
            includes("**/*.pyc").unwrap(),
            includes("*/").unwrap(),
            excludes("outside/").unwrap(),
        ],
        Arc::new(mock.clone()),
    );

    let result = set.to_set().unwrap();
    assert_eq!(
        result.into_iter().collect::<Vec<_>>(),
        vec!["a/", "a/x.py", "vendored/"]
    );

    let listed = mock.listed_dirs();
    assert!(!listed.iter().any(|d| d.starts_with("a/loop") || d.starts_with("vendored")));
}
