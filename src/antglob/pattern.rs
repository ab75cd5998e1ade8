// src/antglob/pattern.rs

//! Glob spec to anchored regex translation.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use regex::Regex;

use crate::errors::{ChoresError, Result};

/// Matches any run of characters within one path segment.
const STAR: &str = "[^/]*";

/// Matches zero or more whole directory levels, each with its separator.
const RECURSIVE_DIRS: &str = "(?:.+/)?";

/// One compiled include or exclude rule.
///
/// A spec ending in `/` only ever applies to directories; every other spec
/// only applies to files. The compiled regex always has to match the whole
/// root-relative path (`foo/bar/two.py`, or `foo/bar` for a directory).
#[derive(Clone)]
pub struct Pattern {
    spec: String,
    compiled: Regex,
    inclusive: bool,
    is_dir: bool,
}

impl Pattern {
    pub fn new(spec: &str, inclusive: bool) -> Result<Self> {
        let is_dir = spec.ends_with('/');
        let source = format!("^{}$", translate(spec.trim_end_matches('/')));
        let compiled = Regex::new(&source).map_err(|source| ChoresError::InvalidPattern {
            spec: spec.to_string(),
            source,
        })?;

        Ok(Self {
            spec: spec.to_string(),
            compiled,
            inclusive,
            is_dir,
        })
    }

    /// The glob spec this pattern was built from.
    pub fn spec(&self) -> &str {
        &self.spec
    }

    pub fn inclusive(&self) -> bool {
        self.inclusive
    }

    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    pub fn as_regex_str(&self) -> &str {
        self.compiled.as_str()
    }

    /// Whole-path match against a root-relative path without trailing slash.
    pub fn matches(&self, path: &str) -> bool {
        self.compiled.is_match(path)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.compiled.as_str())
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pattern")
            .field("spec", &self.spec)
            .field("inclusive", &self.inclusive)
            .field("is_dir", &self.is_dir)
            .finish_non_exhaustive()
    }
}

/// Build an inclusive pattern.
pub fn includes(spec: &str) -> Result<Pattern> {
    Pattern::new(spec, true)
}

/// Build an exclusive pattern.
pub fn excludes(spec: &str) -> Result<Pattern> {
    Pattern::new(spec, false)
}

/// Translate a slash-separated glob (without trailing slash) into regex
/// source, minus the anchors.
///
/// Every segment but the last is a directory and gets its separator; a bare
/// `**` directory segment may stand for any number of levels, including none.
fn translate(spec: &str) -> String {
    if spec.is_empty() {
        return String::new();
    }

    let mut bits: Vec<&str> = spec.split('/').collect();
    let filename = bits.pop().unwrap_or_default();

    let mut out = String::with_capacity(spec.len() * 2);
    for dir in bits {
        if dir == "**" {
            out.push_str(RECURSIVE_DIRS);
        } else {
            out.push_str(&globify(dir));
            out.push('/');
        }
    }
    out.push_str(&globify(filename));
    out
}

/// Translate one path segment: `*` stays within the segment, `[...]` sets
/// keep their regex meaning, everything else is literal.
fn globify(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len() * 2);
    let mut literal = String::new();
    let mut chars = segment.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '*' => {
                out.push_str(&regex::escape(&literal));
                literal.clear();
                out.push_str(STAR);
            }
            '[' => {
                out.push_str(&regex::escape(&literal));
                literal.clear();
                char_class(&mut chars, &mut out);
            }
            _ => literal.push(c),
        }
    }
    out.push_str(&regex::escape(&literal));
    out
}

/// Copy a bracket set through to `out`, starting just after the `[`.
///
/// An unterminated set is copied as-is, so the regex engine reports it.
fn char_class(chars: &mut Peekable<Chars<'_>>, out: &mut String) {
    out.push('[');
    if chars.next_if_eq(&'^').is_some() {
        out.push('^');
    }
    if chars.next_if_eq(&']').is_some() {
        out.push_str(r"\]");
    }

    while let Some(c) = chars.next() {
        match c {
            ']' => {
                out.push(']');
                return;
            }
            '\\' => {
                out.push('\\');
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            }
            // Nested classes and set operators mean something else to `regex`.
            '[' | '&' | '~' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
}
