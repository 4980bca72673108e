//! Store configuration, loaded from a YAML file.
//!
//! ```yaml
//! path: data/app.json
//! sync: true
//! pretty: false
//! legacy_path_normalization: false
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;


/// File name used when no backing path is configured.
pub const DEFAULT_DB_FILE: &str = "pathbase.json";


#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreConfig {
    /// Filesystem location of the backing file.
    #[serde(default = "default_path")]
    pub path: String,

    /// Default for the `sync` flag of mutating commands issued by the CLI.
    #[serde(default = "default_true")]
    pub sync: bool,

    /// Write indented JSON instead of the compact form.
    #[serde(default)]
    pub pretty: bool,

    /// Strip one leading `/` from the backing path before saving.
    ///
    /// This turns an absolute path into one relative to the working
    /// directory. Off unless a deployment depends on files written that way.
    #[serde(default)]
    pub legacy_path_normalization: bool,
}

impl StoreConfig {
    /// Defaults for a store backed by `path`.
    pub fn new(path: impl Into<String>) -> Self {
        StoreConfig {
            path: path.into(),
            ..Default::default()
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            path: default_path(),
            sync: true,
            pretty: false,
            legacy_path_normalization: false,
        }
    }
}


fn default_path() -> String {
    DEFAULT_DB_FILE.into()
}

fn default_true() -> bool {
    true
}


/// Load a store config from a YAML file.
pub fn load(path: &Path) -> Result<StoreConfig, StoreError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| StoreError::Config(format!("cannot read '{}': {}", path.display(), e)))?;
    parse(&content)
}


/// Parse a store config from a YAML string.
pub fn parse(content: &str) -> Result<StoreConfig, StoreError> {
    serde_yaml::from_str(content)
        .map_err(|e| StoreError::Config(format!("invalid store config: {}", e)))
}
