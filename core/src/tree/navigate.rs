//! Tree traversal.
//!
//! Walks a tree through a key sequence. A missing key is reported as
//! [`Lookup::Absent`]; indexing into a value that is not a mapping is a
//! [`StoreError::TypeMismatch`] and is never swallowed.

use serde_json::Value;
use tracing::debug;

use crate::error::{kind_of, StoreError};
use super::Tree;


/// Outcome of resolving a path against a tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<'a> {
    /// The path addresses the whole tree.
    Root(&'a Tree),
    /// The path exists and addresses this value.
    Found(&'a Value),
    /// Some key along the path is missing.
    Absent,
}

impl<'a> Lookup<'a> {
    /// Collapse to an owned value, reading a missing path as `{}`.
    pub fn into_value_or_empty(self) -> Value {
        match self {
            Lookup::Root(tree) => Value::Object(tree.clone()),
            Lookup::Found(v) => v.clone(),
            Lookup::Absent => Value::Object(Tree::new()),
        }
    }
}


/// Descend from `root` through `keys`.
///
/// An empty key sequence returns `root` unchanged.
pub fn resolve<'a>(root: &'a Tree, keys: &[String]) -> Result<Lookup<'a>, StoreError> {
    let Some((first, rest)) = keys.split_first() else {
        return Ok(Lookup::Root(root));
    };
    let mut current = match root.get(first) {
        Some(v) => v,
        None => return Ok(absent(first)),
    };
    for key in rest {
        current = match current {
            Value::Object(map) => match map.get(key) {
                Some(next) => next,
                None => return Ok(absent(key)),
            },
            other => {
                return Err(StoreError::TypeMismatch {
                    key: key.clone(),
                    found: kind_of(other),
                })
            }
        };
    }
    Ok(Lookup::Found(current))
}


fn absent<'a>(key: &str) -> Lookup<'a> {
    debug!(key = %key, "path segment absent");
    Lookup::Absent
}


/// Descend mutably through `keys`, returning the value they address.
///
/// Same policy as [`resolve`]: `Ok(None)` for a missing key, an error for
/// a step into a non-mapping.
pub fn resolve_mut<'a>(
    root: &'a mut Tree,
    keys: &[String],
) -> Result<Option<&'a mut Value>, StoreError> {
    let Some((first, rest)) = keys.split_first() else {
        return Ok(None);
    };
    let mut current = match root.get_mut(first) {
        Some(v) => v,
        None => return Ok(None),
    };
    for key in rest {
        current = match current {
            Value::Object(map) => match map.get_mut(key) {
                Some(next) => next,
                None => return Ok(None),
            },
            other => {
                return Err(StoreError::TypeMismatch {
                    key: key.clone(),
                    found: kind_of(other),
                })
            }
        };
    }
    Ok(Some(current))
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
