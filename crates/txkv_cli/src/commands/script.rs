//! Script command implementation.
//!
//! Reads one store command per line:
//!
//! ```text
//! # comments and blank lines are skipped
//! get A
//! begin
//! put A 5
//! commit
//! rollback
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};
use txkv_core::{StoreError, TransactionalStore, Value};

use super::demo::render;

/// A parsed script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `get KEY`
    Get(String),
    /// `put KEY VALUE`
    Put(String, Value),
    /// `begin`
    Begin,
    /// `commit`
    Commit,
    /// `rollback`
    Rollback,
}

/// Errors raised while running a script.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// A line could not be parsed.
    #[error("line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What was wrong with the line.
        message: String,
    },

    /// The store rejected a command (strict mode only).
    #[error("line {line}: {source}")]
    Store {
        /// 1-based line number.
        line: usize,
        /// The rejection.
        source: StoreError,
    },

    /// Reading the script or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Counts of what a script run did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScriptSummary {
    /// Commands executed successfully.
    pub executed: usize,
    /// Commands the store rejected.
    pub rejected: usize,
    /// Lines that failed to parse.
    pub unparsed: usize,
}

/// Parses a single line. Returns `Ok(None)` for blank and comment lines.
pub fn parse_line(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut parts = line.split_whitespace();
    let verb = parts.next().unwrap_or_default().to_ascii_lowercase();
    let args: Vec<&str> = parts.collect();

    let command = match (verb.as_str(), args.as_slice()) {
        ("get", [key]) => Command::Get((*key).to_string()),
        ("put", [key, value]) => {
            let value = value
                .parse::<Value>()
                .map_err(|e| format!("invalid value {value:?}: {e}"))?;
            Command::Put((*key).to_string(), value)
        }
        ("begin", []) => Command::Begin,
        ("commit", []) => Command::Commit,
        ("rollback", []) => Command::Rollback,
        ("get", _) => return Err("usage: get KEY".to_string()),
        ("put", _) => return Err("usage: put KEY VALUE".to_string()),
        ("begin" | "commit" | "rollback", _) => {
            return Err(format!("{verb} takes no arguments"));
        }
        _ => return Err(format!("unknown command {verb:?}")),
    };
    Ok(Some(command))
}

/// Executes `command`, returning the line to print.
fn execute(store: &mut TransactionalStore, command: &Command) -> Result<String, StoreError> {
    match command {
        Command::Get(key) => Ok(render(store.get(key))),
        Command::Put(key, value) => store.put(key.as_str(), *value).map(|()| "ok".to_string()),
        Command::Begin => store.begin_transaction().map(|_| "ok".to_string()),
        Command::Commit => store.commit().map(|_| "ok".to_string()),
        Command::Rollback => store.rollback().map(|()| "ok".to_string()),
    }
}

/// Runs every line of `input` against `store`, writing results to `out`.
///
/// In strict mode the first unparseable or rejected line stops the run
/// with an error; otherwise the failure is printed and the run continues.
pub fn run_script<R: BufRead, W: Write>(
    input: R,
    out: &mut W,
    store: &mut TransactionalStore,
    strict: bool,
) -> Result<ScriptSummary, ScriptError> {
    let mut summary = ScriptSummary::default();

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = line?;

        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                summary.unparsed += 1;
                if strict {
                    return Err(ScriptError::Parse {
                        line: line_no,
                        message,
                    });
                }
                warn!(line = line_no, %message, "skipping unparseable line");
                writeln!(out, "parse error: {message}")?;
                continue;
            }
        };

        debug!(line = line_no, ?command, "executing");
        match execute(store, &command) {
            Ok(output) => {
                summary.executed += 1;
                writeln!(out, "{output}")?;
            }
            Err(source) => {
                summary.rejected += 1;
                if strict {
                    return Err(ScriptError::Store {
                        line: line_no,
                        source,
                    });
                }
                writeln!(out, "error: {source}")?;
            }
        }
    }

    Ok(summary)
}

/// Runs the script command.
pub fn run(path: Option<&Path>, strict: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = TransactionalStore::new();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let summary = match path {
        Some(path) => {
            info!("Running script {:?}", path);
            let file = File::open(path)?;
            run_script(BufReader::new(file), &mut out, &mut store, strict)?
        }
        None => {
            info!("Running script from stdin");
            run_script(io::stdin().lock(), &mut out, &mut store, strict)?
        }
    };

    if store.is_active() {
        warn!(
            pending = store.pending_len(),
            "script ended with an open transaction; pending writes discarded"
        );
    }
    info!(
        executed = summary.executed,
        rejected = summary.rejected,
        unparsed = summary.unparsed,
        "Script finished"
    );

    Ok(())
}
