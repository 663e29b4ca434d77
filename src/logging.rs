//! Logging setup for the command-line tools.
//!
//! Logs always go to stderr; stdout carries the tools' actual output.

use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Environment variable controlling `install_version` verbosity
pub const LOG_LEVEL_ENV: &str = "LOGLEVEL";

/// Translate a level name into an `EnvFilter` directive.
///
/// Accepts the usual `tracing` names plus the spellings older tooling
/// used (`WARNING`, `CRITICAL`, `FATAL`), case-insensitively.
pub fn normalize_level(level: &str) -> String {
    match level.trim().to_lowercase().as_str() {
        "warning" => "warn".to_string(),
        "critical" | "fatal" => "error".to_string(),
        "notset" => "trace".to_string(),
        other => other.to_string(),
    }
}

/// Pick the level: `debug` when verbose, else `$LOGLEVEL`, else `default`
///
/// An unknown `$LOGLEVEL` falls back to `default`.
pub fn resolve_level(verbose: bool, from_env: Option<&str>, default: &str) -> String {
    if verbose {
        return "debug".to_string();
    }

    from_env
        .map(normalize_level)
        .filter(|level| !level.is_empty() && LevelFilter::from_str(level).is_ok())
        .unwrap_or_else(|| default.to_string())
}

/// Install the global subscriber writing compact lines to stderr
///
/// `level` must be a plain level name such as `info` or `off`.
pub fn init(level: &str) -> Result<()> {
    let level_filter = LevelFilter::from_str(level)
        .with_context(|| format!("invalid log level '{}'", level))?;
    let filter = EnvFilter::default().add_directive(level_filter.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init()
        .map_err(|e| anyhow!(e))
}
