//! Command: the typed interface for store operations driven from outside
//! the library (the `pbase` binary).
//!
//! # Wire Format
//!
//! Commands serialize as JSON objects with a `"command"` discriminant:
//!
//! ```json
//! {"command": "read", "path": "/users/alice"}
//! {"command": "update", "path": "users/alice", "data": {"age": 31}}
//! {"command": "delete", "path": "users/bob"}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::store::Store;
use crate::tree::ROOT;


#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "command")]
pub enum Command {
    /// Print the value at a path (the whole tree for `/`).
    #[serde(rename = "read")]
    Read {
        #[serde(default = "root_path")]
        path: String,
    },

    /// Deep-merge `data` into the tree at `path`.
    #[serde(rename = "update")]
    Update { path: String, data: Value },

    /// Remove the key at `path`.
    #[serde(rename = "delete")]
    Delete { path: String },

    /// List the child keys of the mapping at `path`.
    #[serde(rename = "keys")]
    Keys {
        #[serde(default = "root_path")]
        path: String,
    },

    /// Print usage.
    #[serde(rename = "help")]
    Help,
}

fn root_path() -> String {
    ROOT.to_string()
}

impl Command {
    /// True for commands that change the tree.
    pub fn is_mutating(&self) -> bool {
        matches!(self, Command::Update { .. } | Command::Delete { .. })
    }
}


/// Outcome of executing a command.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response {
    Ok { output: String },
    Error { message: String },
}

impl Response {
    fn ok(output: impl Into<String>) -> Self {
        Response::Ok { output: output.into() }
    }

    fn error(message: impl ToString) -> Self {
        Response::Error { message: message.to_string() }
    }
}


pub const USAGE: &str = "\
Usage: pbase [--db <file>] [--config <file>] [--no-sync] [--pretty] <command>

Commands:
  read [path]            Print the value at path (default: /)
  update <path> <json>   Deep-merge a JSON value into the tree at path
  delete <path>          Remove the key at path
  keys [path]            List child keys of the mapping at path
  help                   Show this message";


/// Run `cmd` against `store`.
///
/// Values are printed as JSON, indented when `pretty` is set. Mutating
/// commands write the backing file only when `sync` is set.
pub fn execute(store: &mut Store, cmd: Command, sync: bool, pretty: bool) -> Response {
    debug!(command = ?cmd, sync, "executing");
    match cmd {
        Command::Read { path } => match store.read(&path) {
            Ok(value) => render(&value, pretty),
            Err(e) => Response::error(e),
        },
        Command::Update { path, data } => match store.update(&path, data, sync) {
            Ok(()) => Response::ok(""),
            Err(e) => Response::error(e),
        },
        Command::Delete { path } => match store.delete(&path, sync) {
            Ok(()) => Response::ok(""),
            Err(e) => Response::error(e),
        },
        Command::Keys { path } => match store.keys(&path) {
            Ok(keys) => Response::ok(keys.join("\n")),
            Err(e) => Response::error(e),
        },
        Command::Help => Response::ok(USAGE),
    }
}


fn render(value: &Value, pretty: bool) -> Response {
    let text = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    match text {
        Ok(s) => Response::ok(s),
        Err(e) => Response::error(format!("failed to render value: {}", e)),
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn temp_store(name: &str) -> Store {
        let dir = std::env::temp_dir()
            .join("pathbase_command_tests")
            .join(name);
        let _ = std::fs::remove_dir_all(&dir);
        Store::open(dir.join("db.json").to_string_lossy().into_owned()).unwrap()
    }

    #[test]
    fn command_wire_format() {
        let cmd = Command::Update { path: "a/b".into(), data: json!({"c": 1}) };
        let wire = serde_json::to_value(&cmd).unwrap();
        assert_eq!(wire, json!({"command": "update", "path": "a/b", "data": {"c": 1}}));

        let back: Command = serde_json::from_str(r#"{"command": "read"}"#).unwrap();
        assert_eq!(back, Command::Read { path: "/".into() });
    }

    #[test]
    fn mutating_commands() {
        assert!(Command::Delete { path: "x".into() }.is_mutating());
        assert!(Command::Update { path: "x".into(), data: json!(1) }.is_mutating());
        assert!(!Command::Read { path: "x".into() }.is_mutating());
        assert!(!Command::Help.is_mutating());
    }

    #[test]
    fn update_then_read() {
        let mut store = temp_store("update_read");
        let resp = execute(
            &mut store,
            Command::Update { path: "a/b".into(), data: json!({"c": 1}) },
            false,
            false,
        );
        assert_eq!(resp, Response::Ok { output: String::new() });

        let resp = execute(&mut store, Command::Read { path: "a".into() }, false, false);
        assert_eq!(resp, Response::Ok { output: r#"{"b":{"c":1}}"#.into() });
    }

    #[test]
    fn read_missing_prints_empty_mapping() {
        let mut store = temp_store("read_missing");
        let resp = execute(&mut store, Command::Read { path: "nope".into() }, false, false);
        assert_eq!(resp, Response::Ok { output: "{}".into() });
    }

    #[test]
    fn errors_become_error_responses() {
        let mut store = temp_store("errors");
        execute(&mut store, Command::Update { path: "a".into(), data: json!(1) }, false, false);
        match execute(&mut store, Command::Read { path: "a/b".into() }, false, false) {
            Response::Error { message } => assert!(message.contains("cannot index key 'b'")),
            other => panic!("expected Error, got {:?}", other),
        }
    }

    #[test]
    fn keys_one_per_line() {
        let mut store = temp_store("keys");
        execute(&mut store, Command::Update { path: "/".into(), data: json!({"b": 1, "a": 2}) }, false, false);
        let resp = execute(&mut store, Command::Keys { path: "/".into() }, false, false);
        assert_eq!(resp, Response::Ok { output: "a\nb".into() });
    }

    #[test]
    fn help_prints_usage() {
        let mut store = temp_store("help");
        match execute(&mut store, Command::Help, false, false) {
            Response::Ok { output } => assert!(output.starts_with("Usage: pbase")),
            other => panic!("expected Ok, got {:?}", other),
        }
    }
}
