// src/antglob/mod.rs

//! Recursive globbing with ant-style syntax.
//!
//! Build an ordered list of [`includes`] / [`excludes`] patterns, hand it to
//! a [`FileSet`] together with a root directory, and iterate:
//!
//! ```no_run
//! use chores::antglob::{excludes, includes, FileSet};
//!
//! # fn main() -> chores::errors::Result<()> {
//! let set = FileSet::new(".", vec![
//!     includes("**/*.py")?,
//!     excludes("**/tests/**/*")?,
//!     excludes(".venv/")?,
//! ]);
//! for path in &set {
//!     println!("{}", path?);
//! }
//! # Ok(())
//! # }
//! ```

pub mod fileset;
pub mod pattern;

pub use fileset::{FileSet, PathSource, Walk};
pub use pattern::{excludes, includes, Pattern};
