// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::model::{ChoresConfig, ConfigOverrides, RawConfigFile};
use crate::errors::Result;
use crate::fs::{FileSystem, RealFileSystem};

/// Name of the per-project configuration file.
pub const CONFIG_FILE_NAME: &str = "Chores.toml";

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file and resolve it against the directory it
/// lives in, without command-line overrides.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ChoresConfig> {
    let path = path.as_ref();
    let raw = load_from_path(path)?;
    let root = config_root_dir(path);
    ChoresConfig::resolve(raw, root, &RealFileSystem, &ConfigOverrides::default())
}

/// Resolve the configuration for a run started in `start`.
///
/// - An explicit `config` path must exist; its directory is the project root.
/// - Otherwise the nearest `Chores.toml` at or above `start` is used.
/// - With no config file anywhere, `start` is the root and defaults apply.
pub fn load_project(
    fs: &dyn FileSystem,
    start: &Path,
    config: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<ChoresConfig> {
    let (root, raw) = match config {
        Some(path) => (config_root_dir(path), read_config(fs, path)?),
        None => match find_project_root(fs, start) {
            Some(root) => {
                let raw = read_config(fs, &root.join(CONFIG_FILE_NAME))?;
                (root, raw)
            }
            None => {
                debug!(?start, "no {CONFIG_FILE_NAME} found, using defaults");
                (start.to_path_buf(), RawConfigFile::default())
            }
        },
    };

    let cfg = ChoresConfig::resolve(raw, root, fs, overrides)?;
    info!(
        root = ?cfg.project_root,
        srcdir = %cfg.layout.srcdir,
        testdir = %cfg.layout.testdir,
        "loaded project configuration"
    );
    Ok(cfg)
}

/// Search for `Chores.toml` from `start` up to the filesystem root and
/// return the directory containing it.
pub fn find_project_root(fs: &dyn FileSystem, start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| fs.is_file(&dir.join(CONFIG_FILE_NAME)))
        .map(Path::to_path_buf)
}

fn read_config(fs: &dyn FileSystem, path: &Path) -> Result<RawConfigFile> {
    let contents = fs.read_to_string(path)?;
    Ok(toml::from_str(&contents)?)
}

/// The directory a config file lives in, or the working directory for a
/// bare file name.
fn config_root_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}
