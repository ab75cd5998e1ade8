// src/types.rs

use std::str::FromStr;
use serde::Deserialize;

/// Which project layout preset to start from.
///
/// - `Auto`: detect from the files present under the project root (default).
/// - `Src`: sources in `src/`, tests in `src/tests/`.
/// - `Flat`: everything top-level, tests in `tests/`.
/// - `Maven`: `src/main/python` and `src/test/python`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    #[default]
    Auto,
    Src,
    Flat,
    Maven,
}

impl FromStr for LayoutKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(LayoutKind::Auto),
            "src" => Ok(LayoutKind::Src),
            "flat" => Ok(LayoutKind::Flat),
            "maven" => Ok(LayoutKind::Maven),
            other => Err(format!(
                "invalid layout kind: {other} (expected \"auto\", \"src\", \"flat\" or \"maven\")"
            )),
        }
    }
}
