use serde_json::Value;

use crate::command::Command;


/// A parsed command line: global flags plus the command to run.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    /// `--db <file>`: backing file, overriding config and environment.
    pub db: Option<String>,
    /// `--config <file>`: YAML store config.
    pub config: Option<String>,
    /// `--no-sync`: do not write mutations to disk.
    pub no_sync: bool,
    /// `--pretty`: indent printed and saved JSON.
    pub pretty: bool,
    pub command: Command,
}


/// Parse CLI arguments into an [`Invocation`].
///
/// Global flags come first, then the subcommand and its arguments.
/// Arguments are expected WITHOUT the program name (i.e., `args` should
/// be `["read", "a/b"]`, not `["pbase", "read", "a/b"]`).
pub fn parse_args(args: &[&str]) -> Result<Invocation, String> {
    let mut db = None;
    let mut config = None;
    let mut no_sync = false;
    let mut pretty = false;
    let mut help = false;

    let mut i = 0;
    while i < args.len() && args[i].starts_with("--") {
        match args[i] {
            "--db" => {
                i += 1;
                db = Some(take_arg(args, i, "--db")?);
            }
            "--config" => {
                i += 1;
                config = Some(take_arg(args, i, "--config")?);
            }
            "--no-sync" => no_sync = true,
            "--pretty" => pretty = true,
            "--help" => help = true,
            other => return Err(format!("Unknown flag: '{}'", other)),
        }
        i += 1;
    }

    let command = if help {
        Command::Help
    } else {
        parse_command(&args[i..])?
    };

    Ok(Invocation { db, config, no_sync, pretty, command })
}


// ---------------------------------------------------------------------------
// Sub-parsers
// ---------------------------------------------------------------------------

fn parse_command(args: &[&str]) -> Result<Command, String> {
    if args.is_empty() {
        return Err("No command specified. Run 'pbase help' for usage.".into());
    }

    match args[0] {
        "read" => parse_read(args),
        "update" => parse_update(args),
        "delete" => parse_delete(args),
        "keys" => parse_keys(args),
        "help" => Ok(Command::Help),
        _ => Err(format!("Unknown command: '{}'", args[0])),
    }
}

/// `pbase read [path]`
fn parse_read(args: &[&str]) -> Result<Command, String> {
    if args.len() > 2 {
        return Err("Usage: pbase read [path]".into());
    }
    Ok(Command::Read {
        path: optional_path(args),
    })
}

/// `pbase update <path> <json>`
fn parse_update(args: &[&str]) -> Result<Command, String> {
    if args.len() != 3 {
        return Err("Usage: pbase update <path> <json>".into());
    }
    let data: Value = serde_json::from_str(args[2])
        .map_err(|e| format!("update data is not valid JSON: {}", e))?;
    Ok(Command::Update {
        path: args[1].into(),
        data,
    })
}

/// `pbase delete <path>`
fn parse_delete(args: &[&str]) -> Result<Command, String> {
    if args.len() != 2 {
        return Err("Usage: pbase delete <path>".into());
    }
    Ok(Command::Delete {
        path: args[1].into(),
    })
}

/// `pbase keys [path]`
fn parse_keys(args: &[&str]) -> Result<Command, String> {
    if args.len() > 2 {
        return Err("Usage: pbase keys [path]".into());
    }
    Ok(Command::Keys {
        path: optional_path(args),
    })
}


// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn optional_path(args: &[&str]) -> String {
    args.get(1).copied().unwrap_or(crate::tree::ROOT).to_string()
}

fn take_arg(args: &[&str], index: usize, flag: &str) -> Result<String, String> {
    if index >= args.len() {
        return Err(format!("{} requires a value", flag));
    }
    Ok(args[index].into())
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
