//! Logging setup.
//!
//! Everything logs through `tracing`. Plain subcommands write to stderr so
//! stdout stays clean for their output; the terminal editor owns the
//! screen, so it writes to a file instead.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

/// Default log file for the terminal editor.
pub const DEFAULT_LOG_FILE: &str = "fillpoly.log";

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise the level is `info`, or `debug`
/// with `verbose`.
pub fn init_logging(verbose: bool, target: LogTarget) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true);

    match target {
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            builder.with_writer(Mutex::new(file)).with_ansi(false).try_init()
        }
    }
    .map_err(|e| anyhow!("failed to install logger: {}", e))
}
