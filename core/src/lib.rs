//! # pathbase-core
//!
//! A minimal embedded document store: one nested mapping, addressed by
//! slash-delimited paths and persisted whole to a single JSON file.
//!
//! ```no_run
//! use pathbase_core::Store;
//! use serde_json::json;
//!
//! # fn main() -> Result<(), pathbase_core::StoreError> {
//! let mut store = Store::open("data/app.json")?;
//! store.update("users/alice", json!({"age": 30}), true)?;
//! assert_eq!(store.read("users/alice/age")?, json!(30));
//! store.delete("users/alice", true)?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod storage;
pub mod store;
pub mod tree;

pub use command::{execute, Command, Response};
pub use config::StoreConfig;
pub use error::StoreError;
pub use store::Store;
pub use tree::{Lookup, Tree, TreePath};
