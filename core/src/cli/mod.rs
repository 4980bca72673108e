//! Command-line front end: argument parsing and store config resolution.

pub mod parse;

pub use parse::{parse_args, Invocation};

use std::path::Path;

use crate::config::{self, StoreConfig};
use crate::error::StoreError;

/// Environment variable naming the backing file.
pub const DB_ENV: &str = "PBASE_DB";
/// Environment variable naming the YAML store config.
pub const CONFIG_ENV: &str = "PBASE_CONFIG";


/// Work out the store config for an invocation.
///
/// The config file comes from `--config`, else `env_config`; without one
/// the defaults apply. The backing path is then overridden by `--db`, else
/// by `env_db`. `--pretty` forces indented output and `--no-sync` turns
/// syncing off; neither flag can turn the setting back on.
pub fn resolve_config(
    inv: &Invocation,
    env_db: Option<String>,
    env_config: Option<String>,
) -> Result<StoreConfig, StoreError> {
    let mut cfg = match inv.config.clone().or(env_config) {
        Some(file) => config::load(Path::new(&file))?,
        None => StoreConfig::default(),
    };
    if let Some(db) = inv.db.clone().or(env_db) {
        cfg.path = db;
    }
    if inv.pretty {
        cfg.pretty = true;
    }
    if inv.no_sync {
        cfg.sync = false;
    }
    Ok(cfg)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_DB_FILE;

    #[test]
    fn defaults_without_flags_or_env() {
        let inv = parse_args(&["read"]).unwrap();
        let cfg = resolve_config(&inv, None, None).unwrap();
        assert_eq!(cfg.path, DEFAULT_DB_FILE);
        assert!(cfg.sync);
        assert!(!cfg.pretty);
    }

    #[test]
    fn db_flag_beats_env() {
        let inv = parse_args(&["--db", "flag.json", "read"]).unwrap();
        let cfg = resolve_config(&inv, Some("env.json".into()), None).unwrap();
        assert_eq!(cfg.path, "flag.json");

        let inv = parse_args(&["read"]).unwrap();
        let cfg = resolve_config(&inv, Some("env.json".into()), None).unwrap();
        assert_eq!(cfg.path, "env.json");
    }

    #[test]
    fn config_file_then_overrides() {
        let dir = std::env::temp_dir().join("pathbase_cli_tests");
        let _ = std::fs::create_dir_all(&dir);
        let file = dir.join("store.yaml");
        std::fs::write(&file, "path: from-config.json\nsync: true\n").unwrap();
        let file = file.to_string_lossy().into_owned();

        let inv = parse_args(&["--no-sync", "--pretty", "read"]).unwrap();
        let cfg = resolve_config(&inv, None, Some(file.clone())).unwrap();
        assert_eq!(cfg.path, "from-config.json");
        assert!(!cfg.sync);
        assert!(cfg.pretty);

        let inv = parse_args(&["--config", file.as_str(), "--db", "x.json", "read"]).unwrap();
        let cfg = resolve_config(&inv, None, None).unwrap();
        assert_eq!(cfg.path, "x.json");
        assert!(cfg.sync);
    }

    #[test]
    fn missing_config_file_is_error() {
        let inv = parse_args(&["--config", "/nonexistent/pbase.yaml", "read"]).unwrap();
        assert!(matches!(resolve_config(&inv, None, None), Err(StoreError::Config(_))));
    }
}
