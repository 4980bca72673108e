//! pbase: command-line access to a pathbase store.
//!
//! # Usage
//!
//! ```text
//! pbase read /
//! pbase update users/alice '{"age": 30}'
//! pbase --db data/app.json delete users/alice
//! pbase --no-sync update scratch/x 1
//! ```

mod logging;

use std::process;

use pathbase_core::cli::{parse_args, resolve_config, CONFIG_ENV, DB_ENV};
use pathbase_core::command::{execute, Command, Response, USAGE};
use pathbase_core::Store;
use tracing::{debug, warn};


fn main() {
    logging::init();

    let args: Vec<String> = std::env::args().collect();
    let arg_refs: Vec<&str> = args[1..].iter().map(|s| s.as_str()).collect();

    let inv = match parse_args(&arg_refs) {
        Ok(inv) => inv,
        Err(e) => {
            eprintln!("pbase: {}", e);
            process::exit(1);
        }
    };

    // Help needs no store.
    if matches!(inv.command, Command::Help) {
        println!("{}", USAGE);
        return;
    }

    let config = match resolve_config(&inv, std::env::var(DB_ENV).ok(), std::env::var(CONFIG_ENV).ok()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("pbase: {}", e);
            process::exit(1);
        }
    };
    debug!(path = %config.path, sync = config.sync, "resolved store config");

    let sync = config.sync;
    let pretty = config.pretty;
    if inv.command.is_mutating() && !sync {
        warn!("sync disabled: this change will not be written to {}", config.path);
    }
    let mut store = match Store::with_config(config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("pbase: failed to open store: {}", e);
            process::exit(1);
        }
    };

    match execute(&mut store, inv.command, sync, pretty) {
        Response::Ok { output } => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Response::Error { message } => {
            eprintln!("pbase: {}", message);
            process::exit(1);
        }
    }
}
