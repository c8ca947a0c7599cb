//! CLI error types.

use std::fmt;

use rdaview::config::ConfigError;
use rdaview::logging::LoggingError;
use rdaview::ImageError;

/// Errors reported by CLI commands.
#[derive(Debug)]
pub enum CliError {
    /// Failed to load configuration.
    Config(ConfigError),

    /// Failed to install the logger.
    Logging(LoggingError),

    /// Graph construction or part resolution failed.
    Image(ImageError),

    /// Failed to serialize output.
    Output(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(e) => write!(f, "Configuration error: {}", e),
            CliError::Logging(e) => write!(f, "Logging error: {}", e),
            CliError::Image(e) => write!(f, "{}", e),
            CliError::Output(msg) => write!(f, "Failed to write output: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::Logging(e) => Some(e),
            CliError::Image(e) => Some(e),
            CliError::Output(_) => None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e)
    }
}

impl From<LoggingError> for CliError {
    fn from(e: LoggingError) -> Self {
        CliError::Logging(e)
    }
}

impl From<ImageError> for CliError {
    fn from(e: ImageError) -> Self {
        CliError::Image(e)
    }
}

impl From<rdaview::catalog::CatalogError> for CliError {
    fn from(e: rdaview::catalog::CatalogError) -> Self {
        CliError::Image(e.into())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Output(e.to_string())
    }
}
