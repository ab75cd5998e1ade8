use std::path::PathBuf;

use chores::config::{load_from_path, load_project, ChoresConfig, ConfigOverrides, RawConfigFile};
use chores::errors::ChoresError;
use chores::fs::RealFileSystem;
use chores_test_utils::builders::{mock_tree, TreeBuilder};

fn resolve(toml_src: &str) -> Result<ChoresConfig, ChoresError> {
    let raw: RawConfigFile = toml::from_str(toml_src).expect("valid TOML");
    ChoresConfig::resolve(
        raw,
        PathBuf::from("proj"),
        &mock_tree(&[]),
        &ConfigOverrides::default(),
    )
}

#[test]
fn invalid_toml_is_a_toml_error() {
    let tree = TreeBuilder::new()
        .file_with("Chores.toml", "[layout\nkind = ")
        .build();
    let err = load_from_path(tree.join("Chores.toml")).unwrap_err();
    assert!(matches!(err, ChoresError::TomlError(_)), "got {err:?}");
}

#[test]
fn unknown_section_is_rejected() {
    let tree = TreeBuilder::new()
        .file_with("Chores.toml", "[tasks.build]\ncmd = \"make\"\n")
        .build();
    let err = load_from_path(tree.join("Chores.toml")).unwrap_err();
    assert!(matches!(err, ChoresError::TomlError(_)));
}

#[test]
fn unknown_layout_kind_is_rejected() {
    let tree = TreeBuilder::new()
        .file_with("Chores.toml", "[layout]\nkind = \"gradle\"\n")
        .build();
    assert!(load_from_path(tree.join("Chores.toml")).is_err());
}

#[test]
fn missing_file_is_an_io_error() {
    let tree = TreeBuilder::new().build();
    let err = load_from_path(tree.join("nope.toml")).unwrap_err();
    assert!(matches!(err, ChoresError::IoError(_)));
}

#[test]
fn missing_explicit_config_fails_load_project() {
    let tree = TreeBuilder::new().build();
    let result = load_project(
        &RealFileSystem,
        tree.path(),
        Some(&tree.join("nope.toml")),
        &ConfigOverrides::default(),
    );
    assert!(result.is_err());
}

#[test]
fn empty_lint_command_is_rejected() {
    let err = resolve("[lint]\ncommand = \"  \"\n").unwrap_err();
    match err {
        ChoresError::ConfigError(msg) => assert!(msg.contains("[lint].command")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn empty_glob_is_rejected() {
    let err = resolve("[clean]\npatterns = [\"\"]\n").unwrap_err();
    assert!(matches!(err, ChoresError::ConfigError(_)));
}

#[test]
fn malformed_glob_is_an_invalid_pattern() {
    let err = resolve("[clean]\nexcludes = [\"[abc\"]\n").unwrap_err();
    match err {
        ChoresError::InvalidPattern { spec, .. } => assert_eq!(spec, "[abc"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn absolute_layout_dir_is_rejected() {
    let err = resolve("[layout]\nsrcdir = \"/usr/src\"\n").unwrap_err();
    match err {
        ChoresError::ConfigError(msg) => assert!(msg.contains("srcdir")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn escaping_layout_dir_is_rejected() {
    let err = resolve("[layout]\ntestdir = \"../tests\"\n").unwrap_err();
    match err {
        ChoresError::ConfigError(msg) => assert!(msg.contains("testdir")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn error_messages_are_readable() {
    let err = ChoresError::CommandFailed {
        cmd: "pylint".to_string(),
        code: 2,
    };
    assert_eq!(err.to_string(), "command `pylint` failed with RC=2");
}
