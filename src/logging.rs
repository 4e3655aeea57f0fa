//! Logging setup using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the log level:
//! 1. `--verbose` (debug)
//! 2. `TASKPLAN_LOG` environment variable (e.g. "info", "debug")
//! 3. default to `warn`
//!
//! Logs go to stderr so that stdout carries only command output.

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::fmt;

/// Environment variable consulted for the log level
pub const LOG_ENV: &str = "TASKPLAN_LOG";

/// Initialise the global logging subscriber.
///
/// Safe to call more than once; later calls keep the first subscriber.
pub fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose {
        Level::DEBUG
    } else {
        std::env::var(LOG_ENV)
            .ok()
            .and_then(|s| parse_level_str(&s))
            .unwrap_or(Level::WARN)
    };

    // try_init fails only if a subscriber is already installed
    let _ = fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();

    Ok(())
}

fn parse_level_str(s: &str) -> Option<Level> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(Level::ERROR),
        "warn" | "warning" => Some(Level::WARN),
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "trace" => Some(Level::TRACE),
        _ => None,
    }
}
