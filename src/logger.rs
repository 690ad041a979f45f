//! Debug logging support for edtext
//!
//! When debug mode is enabled via config or `--debug`, address parsing and
//! resolution are logged to ~/.edtext/edtext.log.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

const LOG_FILE_NAME: &str = "edtext.log";
const DEFAULT_FILTER: &str = "edtext=debug";

/// Environment variable that overrides the default log filter
pub const LOG_ENV: &str = "EDTEXT_LOG";

/// Initialize the debug logging system
///
/// If `debug_enabled` is true, sets up file logging in `log_dir`.
/// Returns the path to the log file, or None if logging is not enabled.
pub fn init_debug_logging(debug_enabled: bool, log_dir: &Path) -> Result<Option<PathBuf>> {
    if !debug_enabled {
        return Ok(None);
    }

    if let Err(e) = std::fs::create_dir_all(log_dir) {
        // Logging must never break normal operation
        eprintln!("Warning: Could not create log directory {}: {}", log_dir.display(), e);
        return Ok(None);
    }

    let appender = match RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE_NAME)
        .build(log_dir)
    {
        Ok(appender) => appender,
        Err(e) => {
            eprintln!("Warning: Could not create log file in {}: {}", log_dir.display(), e);
            return Ok(None);
        }
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let subscriber = registry()
        .with(
            fmt::layer()
                .with_writer(appender)
                .with_ansi(false)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false),
        )
        .with(filter);

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;

    Ok(Some(log_dir.join(LOG_FILE_NAME)))
}

/// Get the default log file path without initializing logging
pub fn default_log_path() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".edtext").join(LOG_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from("~/.edtext/edtext.log"))
}
