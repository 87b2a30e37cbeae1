//! Structured logging setup using tracing
//!
//! Console-only structured logging with a configurable level. The level
//! comes from the CLI flag or `SHEETPORTER_LOG_LEVEL`; `RUST_LOG` wins over
//! both when set.
//!
//! # Example
//!
//! ```no_run
//! use sheetporter::logging::init_logging;
//!
//! init_logging("info").expect("Failed to initialize logging");
//! tracing::info!("Application started");
//! ```

use crate::domain::{Result, SheetporterError};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Initialize the logging system.
///
/// Logs go to stderr so that the command's own output on stdout stays
/// clean. Calling this twice in one process is an error.
pub fn init_logging(log_level_str: &str) -> Result<()> {
    let log_level = parse_log_level(log_level_str)?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sheetporter={log_level}")));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| {
            SheetporterError::Configuration(format!("Failed to initialize logging: {e}"))
        })?;

    tracing::debug!(level = %log_level, "Logging initialized");
    Ok(())
}

/// Parse log level from string
fn parse_log_level(level_str: &str) -> Result<Level> {
    match level_str.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(SheetporterError::Configuration(format!(
            "Invalid log level: {level_str}. Must be one of: trace, debug, info, warn, error"
        ))),
    }
}
