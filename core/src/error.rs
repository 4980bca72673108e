use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Store errors
// ---------------------------------------------------------------------------

/// Everything that can go wrong while opening, reading or writing a store.
///
/// A missing key is not an error: traversal reports it as
/// [`Lookup::Absent`](crate::tree::Lookup::Absent) and the facade turns it
/// into an empty mapping or a no-op.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A path step tried to index a key into a value that is not a mapping.
    #[error("cannot index key '{key}' into a {found} value")]
    TypeMismatch { key: String, found: &'static str },

    /// The backing file exists but does not hold a serialized tree.
    #[error("corrupt store file {}: {source}", .path.display())]
    CorruptStore {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The backing file holds valid JSON whose top level is not a mapping.
    #[error("corrupt store file {}: top-level value is a {found}, expected a mapping", .path.display())]
    NotATree { path: PathBuf, found: &'static str },

    /// Filesystem failure while reading, writing or creating directories.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The tree could not be serialized for saving.
    #[error("failed to serialize tree: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The path has no segments to address (e.g. the empty string).
    #[error("invalid path '{0}': no key to address")]
    InvalidPath(String),

    /// A root update was given something other than a mapping.
    #[error("root update requires a mapping, got a {0}")]
    RootNotMapping(&'static str),

    /// The store configuration file could not be read or parsed.
    #[error("config error: {0}")]
    Config(String),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io { path: path.into(), source }
    }
}


/// Human-readable name of a value's variant, used in error messages.
pub fn kind_of(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kind_names() {
        assert_eq!(kind_of(&json!(null)), "null");
        assert_eq!(kind_of(&json!(true)), "boolean");
        assert_eq!(kind_of(&json!(1.5)), "number");
        assert_eq!(kind_of(&json!("s")), "string");
        assert_eq!(kind_of(&json!([1])), "sequence");
        assert_eq!(kind_of(&json!({})), "mapping");
    }

    #[test]
    fn type_mismatch_display() {
        let e = StoreError::TypeMismatch { key: "b".into(), found: "number" };
        assert_eq!(e.to_string(), "cannot index key 'b' into a number value");
    }

    #[test]
    fn io_display_includes_path() {
        let e = StoreError::io(
            "/nope/db.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = e.to_string();
        assert!(msg.contains("/nope/db.json"));
        assert!(msg.contains("denied"));
    }
}
