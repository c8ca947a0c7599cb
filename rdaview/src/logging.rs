//! Logging setup.
//!
//! Installs a global `tracing` subscriber that writes formatted events through
//! a non-blocking writer, to stderr or to a log file. `RUST_LOG` takes
//! precedence over the configured level.
//!
//! ```ignore
//! let config = ClientConfig::load_default()?;
//! let _guard = rdaview::logging::init_logging(&config.logging)?;
//! tracing::info!("ready");
//! ```

use std::path::Path;

use thiserror::Error;
use time::format_description::well_known::Rfc3339;
use time::UtcOffset;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::time::OffsetTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

/// Errors that can occur while installing the subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log filter '{directive}': {reason}")]
    InvalidFilter { directive: String, reason: String },

    #[error("Failed to open log file {path}: {reason}")]
    LogFile { path: String, reason: String },

    #[error("A global logger is already installed")]
    AlreadyInitialized,
}

/// Keeps the background writer alive. Buffered events are flushed when this
/// is dropped, so hold it for the life of the program.
#[must_use = "dropping the guard stops log output"]
pub struct LoggingGuard {
    _guard: WorkerGuard,
}

/// Parse a filter directive such as `info` or `rdaview=debug,warn`.
pub fn parse_filter(directive: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(directive).map_err(|e| LoggingError::InvalidFilter {
        directive: directive.to_string(),
        reason: e.to_string(),
    })
}

/// Install the global subscriber.
pub fn init_logging(config: &LogConfig) -> Result<LoggingGuard, LoggingError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => parse_filter(&config.level)?,
    };

    let (writer, guard) = match &config.file {
        Some(path) => tracing_appender::non_blocking(file_appender(path)?),
        None => tracing_appender::non_blocking(std::io::stderr()),
    };

    // Local offset lookup can fail once threads exist; fall back to UTC.
    let timer = OffsetTime::local_rfc_3339()
        .unwrap_or_else(|_| OffsetTime::new(UtcOffset::UTC, Rfc3339));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_timer(timer)
                .with_ansi(config.file.is_none()),
        )
        .try_init()
        .map_err(|_| LoggingError::AlreadyInitialized)?;

    Ok(LoggingGuard { _guard: guard })
}

fn file_appender(path: &Path) -> Result<RollingFileAppender, LoggingError> {
    let log_file_error = |reason: String| LoggingError::LogFile {
        path: path.display().to_string(),
        reason,
    };

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| log_file_error("path has no file name".to_string()))?;
    let directory = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(directory)
        .map_err(|e| log_file_error(e.to_string()))
}
