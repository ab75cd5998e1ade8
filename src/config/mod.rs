// src/config/mod.rs

//! Project configuration: the `Chores.toml` model, layout presets and the
//! loader that merges them into one [`ChoresConfig`] per invocation.

pub mod layout;
pub mod loader;
pub mod model;
pub mod validate;

pub use layout::ProjectLayout;
pub use loader::{
    find_project_root, load_and_validate, load_from_path, load_project, CONFIG_FILE_NAME,
};
pub use model::{
    ChoresConfig, CleanSection, ConfigOverrides, LayoutSection, LintSection, ProjectSection,
    RawConfigFile,
};
