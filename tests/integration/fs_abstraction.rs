use std::path::{Path, PathBuf};

use chores::fs::mock::MockFileSystem;
use chores::fs::{FileSystem, RealFileSystem};
use chores_test_utils::builders::{mock_tree, TreeBuilder};

#[test]
fn mock_normalises_current_dir_prefix() {
    let fs = MockFileSystem::new();
    fs.add_file("./pkg/mod.py", "x = 1\n");

    assert!(fs.is_file(Path::new("pkg/mod.py")));
    assert!(fs.is_dir(Path::new("./pkg")));
    assert!(fs.is_dir(Path::new(".")));
    assert_eq!(fs.read_to_string(Path::new("pkg/mod.py")).unwrap(), "x = 1\n");
}

#[test]
fn mock_read_dir_returns_full_paths_in_name_order() {
    let fs = mock_tree(&["d/b.txt", "d/a.txt", "d/sub/"]);

    let entries = fs.read_dir(Path::new("d")).unwrap();
    assert_eq!(
        entries,
        vec![
            PathBuf::from("d/a.txt"),
            PathBuf::from("d/b.txt"),
            PathBuf::from("d/sub")
        ]
    );
    assert_eq!(fs.listed_dirs(), vec![PathBuf::from("d")]);

    fs.clear_listed();
    assert!(fs.listed_dirs().is_empty());
}

#[test]
fn mock_read_dir_on_file_or_missing_fails() {
    let fs = mock_tree(&["f.txt"]);
    assert!(fs.read_dir(Path::new("f.txt")).is_err());
    assert!(fs.read_dir(Path::new("missing")).is_err());
    assert!(fs.read_to_string(Path::new("missing")).is_err());
}

#[test]
fn mock_removal_updates_parents() {
    let fs = mock_tree(&["a/b/c.txt", "a/keep.txt"]);

    fs.remove_dir_all(Path::new("a/b")).unwrap();
    assert!(!fs.exists(Path::new("a/b")));
    assert!(!fs.exists(Path::new("a/b/c.txt")));
    assert_eq!(
        fs.read_dir(Path::new("a")).unwrap(),
        vec![PathBuf::from("a/keep.txt")]
    );

    fs.remove_file(Path::new("a/keep.txt")).unwrap();
    assert!(fs.read_dir(Path::new("a")).unwrap().is_empty());

    assert!(fs.remove_file(Path::new("a")).is_err());
    assert!(fs.remove_dir_all(Path::new("nope")).is_err());
}

#[test]
fn real_filesystem_round_trip() {
    let tree = TreeBuilder::new()
        .file_with("pkg/mod.py", "print('hi')\n")
        .file("pkg/data/blob.bin")
        .build();
    let fs = RealFileSystem;

    assert!(fs.is_dir(&tree.join("pkg")));
    assert!(fs.is_file(&tree.join("pkg/mod.py")));
    assert_eq!(
        fs.read_to_string(&tree.join("pkg/mod.py")).unwrap(),
        "print('hi')\n"
    );

    let mut entries = fs.read_dir(&tree.join("pkg")).unwrap();
    entries.sort();
    assert_eq!(entries, vec![tree.join("pkg/data"), tree.join("pkg/mod.py")]);

    fs.remove_dir_all(&tree.join("pkg/data")).unwrap();
    fs.remove_file(&tree.join("pkg/mod.py")).unwrap();
    assert!(fs.read_dir(&tree.join("pkg")).unwrap().is_empty());
}

#[test]
fn real_filesystem_errors_carry_context() {
    let tree = TreeBuilder::new().build();
    let err = RealFileSystem
        .read_to_string(&tree.join("missing.txt"))
        .unwrap_err();
    assert!(format!("{err:#}").contains("missing.txt"));
}

#[test]
fn mock_symlinks_resolve_relative_to_their_directory() {
    let fs = mock_tree(&["a/x.py", "data/blob.bin"]);
    fs.add_symlink("a/up", "..");
    fs.add_symlink("a/data", "../data");
    fs.add_symlink("self", "self");

    assert!(fs.is_symlink(Path::new("a/up")));
    assert!(fs.is_dir(Path::new("a/up")));
    assert!(fs.is_dir(Path::new("a/data")));
    assert_eq!(
        fs.read_dir(Path::new("a/data")).unwrap(),
        vec![PathBuf::from("a/data/blob.bin")]
    );
    assert!(!fs.is_symlink(Path::new("a")));

    // A self-referencing link resolves to nothing.
    assert!(fs.is_symlink(Path::new("self")));
    assert!(!fs.exists(Path::new("self")));
}

#[cfg(unix)]
#[test]
fn real_filesystem_reports_symlinks_without_following() {
    let tree = TreeBuilder::new().file("target/f.txt").build();
    std::os::unix::fs::symlink(tree.join("target"), tree.join("link")).unwrap();
    let fs = RealFileSystem;

    assert!(fs.is_symlink(&tree.join("link")));
    assert!(fs.is_dir(&tree.join("link")));
    assert!(!fs.is_symlink(&tree.join("target")));
    assert!(!fs.is_symlink(&tree.join("missing")));
}
