//! Store facade: an in-memory tree bound to one backing file.
//!
//! The whole tree is loaded when the store opens. `update` and `delete`
//! mutate it in place and, when `sync` is set, rewrite the backing file
//! in full. Nothing is written on any other schedule and there is no
//! dirty tracking: a synchronized call always rewrites the file.

use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::config::StoreConfig;
use crate::error::{kind_of, StoreError};
use crate::storage::{self, SaveOptions};
use crate::tree::{build_nested, deep_merge, resolve, resolve_mut, Lookup, Tree, TreePath, SEPARATOR};


/// An open document store.
#[derive(Debug, Clone)]
pub struct Store {
    config: StoreConfig,
    /// Backing file location, as configured. Legacy mode drops one leading
    /// `/` from it after each save.
    path: String,
    /// The entire database contents.
    cache: Tree,
}

impl Store {
    /// Open the store backed by `path` with default settings.
    ///
    /// A missing file gives an empty store; nothing is created until the
    /// first synchronized write.
    pub fn open(path: impl Into<String>) -> Result<Self, StoreError> {
        Self::with_config(StoreConfig::new(path))
    }

    /// Open a store described by `config`.
    pub fn with_config(config: StoreConfig) -> Result<Self, StoreError> {
        let cache = storage::load(&config.path)?;
        Ok(Store {
            path: config.path.clone(),
            config,
            cache,
        })
    }

    /// Read the value at `path`.
    ///
    /// `"/"` returns the whole tree. A path that does not exist returns an
    /// empty mapping. Stepping into a non-mapping value is an error.
    pub fn read(&self, path: &str) -> Result<Value, StoreError> {
        Ok(self.lookup(path)?.into_value_or_empty())
    }

    /// Like [`Store::read`], but borrowed and keeping found and absent apart.
    pub fn lookup(&self, path: &str) -> Result<Lookup<'_>, StoreError> {
        if TreePath::is_root(path) {
            return Ok(Lookup::Root(&self.cache));
        }
        resolve(&self.cache, &TreePath::parse(path).segments)
    }

    /// Keys of the mapping at `path`, sorted.
    ///
    /// Empty when the path is absent or holds a leaf.
    pub fn keys(&self, path: &str) -> Result<Vec<String>, StoreError> {
        let mut keys: Vec<String> = match self.lookup(path)? {
            Lookup::Root(tree) => tree.keys().cloned().collect(),
            Lookup::Found(Value::Object(map)) => map.keys().cloned().collect(),
            Lookup::Found(_) | Lookup::Absent => Vec::new(),
        };
        keys.sort();
        Ok(keys)
    }

    /// Deep-merge `data` into the tree at `path`.
    ///
    /// At `"/"` the data must itself be a mapping and is merged into the
    /// root. Elsewhere `data` is wrapped in one mapping per path segment
    /// and merged, so sibling keys along the way are preserved while a
    /// leaf on either side is replaced outright.
    #[instrument(level = "debug", skip(self, data))]
    pub fn update(&mut self, path: &str, data: Value, sync: bool) -> Result<(), StoreError> {
        let overlay = if TreePath::is_root(path) {
            match data {
                Value::Object(map) => map,
                other => return Err(StoreError::RootNotMapping(kind_of(&other))),
            }
        } else {
            let parsed = TreePath::parse(path.trim());
            build_nested(&parsed.segments, data)
                .ok_or_else(|| StoreError::InvalidPath(path.to_string()))?
        };

        deep_merge(&mut self.cache, overlay);

        if sync {
            self.sync()?;
        }
        Ok(())
    }

    /// Remove the key addressed by `path`.
    ///
    /// A missing intermediate key, a missing final key, or a final
    /// container that is not a mapping all make this a no-op. Stepping
    /// through a leaf on the way to the container is an error, and nothing
    /// is saved in that case.
    #[instrument(level = "debug", skip(self))]
    pub fn delete(&mut self, path: &str, sync: bool) -> Result<(), StoreError> {
        let parsed = TreePath::parse(path);
        let Some((parents, last)) = parsed.split_last() else {
            return Err(StoreError::InvalidPath(path.to_string()));
        };

        let removed = if parents.is_empty() {
            self.cache.remove(last)
        } else {
            match resolve_mut(&mut self.cache, parents)? {
                Some(Value::Object(container)) => container.remove(last),
                Some(other) => {
                    debug!(found = kind_of(other), "delete target parent is not a mapping");
                    None
                }
                None => None,
            }
        };
        if removed.is_none() {
            debug!(path = %parsed, "nothing to delete");
        }

        if sync {
            self.sync()?;
        }
        Ok(())
    }

    /// Write the whole tree to the backing file now.
    ///
    /// In legacy mode a backing path that starts with `/` loses that one
    /// character after the save, so each later save strips one more. Only
    /// the raw path is checked and nothing else about it is rewritten:
    /// ` /abs/db.json` keeps writing `/abs/db.json` indefinitely.
    pub fn sync(&mut self) -> Result<(), StoreError> {
        let opts = SaveOptions {
            pretty: self.config.pretty,
            legacy_path_normalization: self.config.legacy_path_normalization,
        };
        storage::save(&self.cache, &self.path, opts)?;

        if opts.legacy_path_normalization {
            if let Some(rebound) = self.path.strip_prefix(SEPARATOR).map(str::to_string) {
                warn!(from = %self.path, to = %rebound, "backing path rewritten by legacy normalization");
                self.path = rebound;
            }
        }
        Ok(())
    }

    /// Replace the in-memory tree with what is on disk, discarding
    /// unsynchronized changes.
    pub fn reload(&mut self) -> Result<(), StoreError> {
        self.cache = storage::load(&self.path)?;
        Ok(())
    }

    /// The in-memory tree.
    pub fn cache(&self) -> &Tree {
        &self.cache
    }

    /// Current backing file location.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
