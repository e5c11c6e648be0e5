//! Application constants for the sensor query engine
//!
//! This module contains table names, plausibility thresholds, default values
//! and environment variable names used throughout the crate.

// =============================================================================
// Backing Store Tables
// =============================================================================

/// Station assignments and validity intervals
pub const STATIONS_TABLE: &str = "stations";

/// Archived readings from fixed installations
pub const FIXED_TEMPERATURE_TABLE: &str = "temperature";

/// Archived readings from weather-station-class devices
pub const WEATHER_TABLE: &str = "meteoTemps";

/// Most recent value per station and measure type
pub const LATEST_TABLE: &str = "lastUpdates";

// =============================================================================
// Plausibility Thresholds
// =============================================================================

/// Plausibility bounds applied by the reading normalizer
///
/// Values at or below a threshold are sensor faults and are dropped silently.
pub mod plausibility {
    /// Fixed installations report spurious lows at and below this value
    pub const FIXED_MIN_TEMP_C: f64 = -30.0;

    /// Weather stations cover a wider legitimate range
    pub const WEATHER_MIN_TEMP_C: f64 = -100.0;
}

// =============================================================================
// Metric Names
// =============================================================================

/// Metric identifiers as stored in `lastUpdates.measure_type`
pub mod metrics {
    pub const TEMP_C: &str = "temp_c";
    pub const HUMIDITY_PCT: &str = "humidity_pct";
    pub const PRESSURE_HPA: &str = "pressure_hpa";
}

// =============================================================================
// Defaults
// =============================================================================

/// Default bound on a single storage call
pub const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 5;

/// Default connection pool size
pub const DEFAULT_MAX_CONNECTIONS: u32 = 4;

/// SQLite busy timeout applied to every connection
pub const SQLITE_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Default database file, relative to the working directory
pub const DEFAULT_DATABASE_PATH: &str = "hose.sqlite3";

/// Display timezone used by the deployed site
pub const DEFAULT_DISPLAY_TIMEZONE: &str = "Europe/Berlin";

/// Time format used for snapshot rows
pub const DEFAULT_TIME_FORMAT: &str = "%H:%M:%S";

/// Fallback format when none is supplied
pub const FALLBACK_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format used when echoing the resolved history window
pub const WINDOW_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Default log level when no verbosity is requested
pub const DEFAULT_LOG_LEVEL: &str = "warn";

// =============================================================================
// Configuration Discovery
// =============================================================================

/// Application name used for config directories
pub const APP_NAME: &str = "hosewebview";

/// Config file name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "hosewebview.toml";

/// Config file name inside the user config directory
pub const USER_CONFIG_FILE: &str = "config.toml";

/// Environment variable naming an explicit config file
pub const ENV_CONFIG: &str = "HOSEWEBVIEW_CONFIG";

/// Environment variable overriding the database path
pub const ENV_DATABASE: &str = "HOSEWEBVIEW_DATABASE";

/// Environment variable overriding the display timezone
pub const ENV_TIMEZONE: &str = "HOSEWEBVIEW_TIMEZONE";

/// Environment variable overriding the default history locations (comma-separated)
pub const ENV_DEFAULT_LOCATIONS: &str = "HOSEWEBVIEW_DEFAULT_LOCATIONS";
