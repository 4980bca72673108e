//! In-memory tree model: path parsing, traversal and deep merge.
//!
//! A tree is a `serde_json` mapping; leaves are any other JSON value.

pub mod path;
pub mod navigate;
pub mod merge;

pub use path::{TreePath, ROOT, SEPARATOR};
pub use navigate::{resolve, resolve_mut, Lookup};
pub use merge::{build_nested, deep_merge};

/// A nested mapping of string keys to values or further mappings.
pub type Tree = serde_json::Map<String, serde_json::Value>;
