//! Whole-tree persistence to a single JSON file.
//!
//! The file is read completely on open and rewritten completely on every
//! save. Writes truncate the file in place; there is no temp file, rename
//! or lock, so a crash mid-write can leave a partial file behind.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};

use crate::error::{kind_of, StoreError};
use crate::tree::Tree;


/// Options that shape how a tree is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveOptions {
    /// Indented output instead of compact.
    pub pretty: bool,
    /// Strip one leading `/` from the path before writing.
    pub legacy_path_normalization: bool,
}


/// Read the tree stored at `path`.
///
/// Surrounding whitespace in `path` is ignored. A file that does not exist
/// yet reads as an empty tree; this never creates files or directories.
pub fn load(path: &str) -> Result<Tree, StoreError> {
    let path = Path::new(path.trim());
    if !path.exists() {
        debug!(path = %path.display(), "no backing file, starting empty");
        return Ok(Tree::new());
    }

    let bytes = fs::read(path).map_err(|e| StoreError::io(path, e))?;
    let value: Value = serde_json::from_slice(&bytes).map_err(|e| StoreError::CorruptStore {
        path: path.to_path_buf(),
        source: e,
    })?;

    match value {
        Value::Object(tree) => {
            info!(path = %path.display(), keys = tree.len(), "loaded store");
            Ok(tree)
        }
        other => Err(StoreError::NotATree {
            path: path.to_path_buf(),
            found: kind_of(&other),
        }),
    }
}


/// Compute the path a save will actually write to.
///
/// In legacy mode one leading `/` is removed before surrounding whitespace
/// is trimmed, so `/var/db.json` becomes `var/db.json` (relative to the
/// working directory) while ` /var/db.json` is only trimmed.
pub fn normalize_save_path(path: &str, legacy: bool) -> String {
    let path = if legacy {
        path.strip_prefix('/').unwrap_or(path)
    } else {
        path
    };
    path.trim().to_string()
}


/// Serialize `tree` and overwrite the file at `path`.
///
/// Missing parent directories are created. Returns the normalized path
/// that was written.
pub fn save(tree: &Tree, path: &str, opts: SaveOptions) -> Result<PathBuf, StoreError> {
    let target = PathBuf::from(normalize_save_path(path, opts.legacy_path_normalization));

    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
            debug!(dir = %parent.display(), "created store directory");
        }
    }

    let encoded = if opts.pretty {
        serde_json::to_vec_pretty(tree)
    } else {
        serde_json::to_vec(tree)
    };
    let bytes = encoded.map_err(StoreError::Serialize)?;

    fs::write(&target, &bytes).map_err(|e| StoreError::io(&target, e))?;
    info!(path = %target.display(), keys = tree.len(), bytes = bytes.len(), "saved store");
    Ok(target)
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
