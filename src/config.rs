//! Configuration management and validation.
//!
//! Configuration is layered, lowest priority first:
//! 1. Built-in defaults
//! 2. A TOML config file (explicit path, `$HOSEWEBVIEW_CONFIG`,
//!    `./hosewebview.toml`, or the user config directory)
//! 3. Environment variables
//! 4. CLI overrides, applied by the command layer

use crate::constants::{
    APP_NAME, DEFAULT_DATABASE_PATH, DEFAULT_DISPLAY_TIMEZONE, DEFAULT_LOG_LEVEL,
    DEFAULT_MAX_CONNECTIONS, DEFAULT_QUERY_TIMEOUT_SECS, DEFAULT_TIME_FORMAT, ENV_CONFIG,
    ENV_DATABASE, ENV_DEFAULT_LOCATIONS, ENV_TIMEZONE, LOCAL_CONFIG_FILE, USER_CONFIG_FILE,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Backing store settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the SQLite file written by the ingestion pipeline
    pub path: PathBuf,

    /// Bound on any single storage call, in seconds
    pub query_timeout_secs: u64,

    /// Size of the read-only connection pool
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATABASE_PATH),
            query_timeout_secs: DEFAULT_QUERY_TIMEOUT_SECS,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl DatabaseConfig {
    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }
}

/// Presentation settings for local-time rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// IANA timezone name (e.g., "Europe/Berlin"); unknown names fall back to UTC
    pub timezone: String,

    /// strftime-style format for snapshot times
    pub time_format: String,

    /// Locations suggested for history from the snapshot view
    ///
    /// Presentation only; a history query without locations still covers
    /// every current location.
    pub default_locations: Vec<String>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_DISPLAY_TIMEZONE.to_string(),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            default_locations: Vec::new(),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level for the crate's own targets
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

/// Where a configuration file was found
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// Path given on the command line
    Explicit(PathBuf),
    /// Path named by `$HOSEWEBVIEW_CONFIG`
    Environment(PathBuf),
    /// Found in the working directory
    CurrentDir(PathBuf),
    /// Found in the user config directory
    UserConfig(PathBuf),
    /// No file, defaults only
    Defaults,
}

impl ConfigSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigSource::Explicit(p)
            | ConfigSource::Environment(p)
            | ConfigSource::CurrentDir(p)
            | ConfigSource::UserConfig(p) => Some(p),
            ConfigSource::Defaults => None,
        }
    }
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.path() {
            Some(path) => write!(f, "{}", path.display()),
            None => write!(f, "(defaults)"),
        }
    }
}

impl Config {
    /// Default config file location in the user config directory
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            Error::configuration("Could not determine user config directory".to_string())
        })?;
        Ok(config_dir.join(APP_NAME).join(USER_CONFIG_FILE))
    }

    /// Locate the config file to load
    ///
    /// An explicit path wins even if it does not exist, so a typo surfaces as
    /// an error instead of silently falling back to defaults.
    pub fn find_config_file(explicit: Option<&Path>) -> ConfigSource {
        if let Some(path) = explicit {
            return ConfigSource::Explicit(path.to_path_buf());
        }

        if let Ok(path) = std::env::var(ENV_CONFIG) {
            let path = PathBuf::from(path);
            if path.exists() {
                return ConfigSource::Environment(path);
            }
        }

        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            return ConfigSource::CurrentDir(local);
        }

        if let Ok(user) = Self::default_config_path() {
            if user.exists() {
                return ConfigSource::UserConfig(user);
            }
        }

        ConfigSource::Defaults
    }

    /// Parse a TOML config file; missing keys take their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::configuration(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        toml::from_str(&content).map_err(|e| {
            Error::configuration(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Load defaults, then the config file, then environment overrides
    pub fn load_layered(explicit: Option<&Path>) -> Result<(Self, ConfigSource)> {
        let source = Self::find_config_file(explicit);
        let mut config = match source.path() {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        debug!("Configuration loaded from {}", source);

        Ok((config, source))
    }

    /// Apply environment overrides through the given lookup
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_DATABASE).filter(|value| !value.trim().is_empty()) {
            self.database.path = PathBuf::from(path);
        }
        if let Some(timezone) = lookup(ENV_TIMEZONE).filter(|value| !value.trim().is_empty()) {
            self.display.timezone = timezone;
        }
        if let Some(locations) =
            lookup(ENV_DEFAULT_LOCATIONS).filter(|value| !value.trim().is_empty())
        {
            self.display.default_locations = locations
                .split(',')
                .map(str::trim)
                .filter(|location| !location.is_empty())
                .map(str::to_string)
                .collect();
        }
    }

    /// Override the database path
    pub fn with_database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.database.path = path.into();
        self
    }

    /// Override the display timezone
    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.display.timezone = timezone.into();
        self
    }

    /// Override the locations suggested for history
    pub fn with_default_locations<S: Into<String>>(
        mut self,
        locations: impl IntoIterator<Item = S>,
    ) -> Self {
        self.display.default_locations = locations.into_iter().map(Into::into).collect();
        self
    }

    /// Override the storage timeout
    pub fn with_query_timeout_secs(mut self, seconds: u64) -> Self {
        self.database.query_timeout_secs = seconds;
        self
    }

    /// Reject settings the store cannot work with
    ///
    /// An unknown timezone is not rejected here; rendering falls back to UTC.
    pub fn validate(&self) -> Result<()> {
        if self.database.path.as_os_str().is_empty() {
            return Err(Error::configuration("Database path cannot be empty"));
        }
        if self.database.query_timeout_secs == 0 {
            return Err(Error::configuration(
                "Query timeout must be at least one second",
            ));
        }
        if self.database.max_connections == 0 {
            return Err(Error::configuration(
                "Connection pool needs at least one connection",
            ));
        }
        Ok(())
    }
}
