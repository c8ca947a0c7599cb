//! Client configuration.
//!
//! Settings are read from an INI file, by default
//! `~/.rdaview/config.ini`. Every key is optional; a missing file yields the
//! defaults.
//!
//! ```ini
//! [catalog]
//! url = https://vector.geobigdata.io/insight-vector/api/vectors/query/items
//! page_size = 1000
//! timeout_secs = 30
//!
//! [image]
//! projection = EPSG:4326
//!
//! [logging]
//! level = info
//! file = /var/log/rdaview.log
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;

use ini::Ini;
use thiserror::Error;

use crate::request::DEFAULT_PROJECTION;

/// Default catalog query endpoint.
pub const DEFAULT_CATALOG_URL: &str =
    "https://vector.geobigdata.io/insight-vector/api/vectors/query/items";

/// Default maximum number of records per catalog query.
pub const DEFAULT_PAGE_SIZE: u32 = 1000;

/// Default catalog request timeout (in seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read or parsed.
    #[error("Failed to read config file {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    /// A key holds a value of the wrong type.
    #[error("Invalid value '{value}' for [{section}] {key}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
    },
}

/// Catalog connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub url: String,
    pub page_size: u32,
    pub timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_CATALOG_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Filter directive, e.g. `info` or `rdaview=debug`.
    pub level: String,
    /// Log file; stderr when unset.
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            file: None,
        }
    }
}

/// Complete client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub catalog: CatalogConfig,
    /// Projection applied to requests that do not name one.
    pub default_projection: String,
    pub logging: LogConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig::default(),
            default_projection: DEFAULT_PROJECTION.to_string(),
            logging: LogConfig::default(),
        }
    }
}

/// Get the default config file path.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".rdaview").join("config.ini"))
}

impl ClientConfig {
    /// Load configuration from a file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_ini(&ini)
    }

    /// Load from [`default_config_path`], or defaults if there is no home
    /// directory.
    pub fn load_default() -> Result<Self, ConfigError> {
        match default_config_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// Parse configuration from INI text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_str(content).map_err(|e| ConfigError::Read {
            path: PathBuf::from("<string>"),
            reason: e.to_string(),
        })?;
        Self::from_ini(&ini)
    }

    fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(section) = ini.section(Some("catalog")) {
            if let Some(url) = non_empty(section.get("url")) {
                config.catalog.url = url.to_string();
            }
            if let Some(page_size) = section.get("page_size") {
                config.catalog.page_size = parse_value("catalog", "page_size", page_size)?;
            }
            if let Some(timeout) = section.get("timeout_secs") {
                config.catalog.timeout_secs = parse_value("catalog", "timeout_secs", timeout)?;
            }
        }

        if let Some(section) = ini.section(Some("image")) {
            if let Some(proj) = non_empty(section.get("projection")) {
                config.default_projection = proj.to_string();
            }
        }

        if let Some(section) = ini.section(Some("logging")) {
            if let Some(level) = non_empty(section.get("level")) {
                config.logging.level = level.to_string();
            }
            config.logging.file = non_empty(section.get("file")).map(PathBuf::from);
        }

        Ok(config)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_value<T: FromStr>(section: &str, key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
    })
}
