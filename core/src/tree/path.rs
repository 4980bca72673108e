//! Slash-delimited path parser.
//!
//! Turns paths like `/users/alice/email` or `config/limits/` into the
//! ordered key sequence used to walk a tree. Keys are matched literally:
//! there are no wildcards and no escaping of `/` inside a key.

use std::fmt;


/// Separator between path segments.
pub const SEPARATOR: char = '/';

/// The literal path that addresses the whole tree.
pub const ROOT: &str = "/";


/// A parsed path: the sequence of keys to descend through.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TreePath {
    pub segments: Vec<String>,
}

impl TreePath {
    /// Split `input` on `/`, dropping a single trailing empty segment.
    ///
    /// Empty segments anywhere else are kept as literal empty-string keys,
    /// so `/a` parses to `["", "a"]` and `a//b` to `["a", "", "b"]`.
    /// Never fails. The root string `"/"` parses to `[""]`; callers test
    /// for it with [`TreePath::is_root`] before parsing.
    pub fn parse(input: &str) -> Self {
        let mut segments: Vec<String> = input.split(SEPARATOR).map(String::from).collect();
        if segments.last().map_or(false, |s| s.is_empty()) {
            segments.pop();
        }
        TreePath { segments }
    }

    /// True for the literal root path `"/"`.
    pub fn is_root(input: &str) -> bool {
        input == ROOT
    }

    /// Split into the keys leading to the parent container and the final key.
    ///
    /// Returns `None` when the path has no segments.
    pub fn split_last(&self) -> Option<(&[String], &str)> {
        self.segments
            .split_last()
            .map(|(last, parents)| (parents, last.as_str()))
    }

    /// Join the segments back with `/`.
    pub fn to_slashed(&self) -> String {
        self.segments.join("/")
    }
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_slashed())
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
