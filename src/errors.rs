// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChoresError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// A glob spec whose translation the regex engine rejected, typically a
    /// malformed `[...]` character set.
    #[error("invalid glob pattern '{spec}': {source}")]
    InvalidPattern {
        spec: String,
        #[source]
        source: regex::Error,
    },

    #[error("command `{cmd}` failed with RC={code}")]
    CommandFailed { cmd: String, code: i32 },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, ChoresError>;
