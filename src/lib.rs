//! Hose Webview Library
//!
//! A Rust library for reading home sensor network data from the shared SQLite
//! store and reconciling it by logical location.
//!
//! This library provides tools for:
//! - Tracking which station served which location during which time interval
//! - Normalizing fixed, weather-station and latest-value readings into one stream
//! - Dropping implausible sensor values per source
//! - Joining readings to the station interval valid at their timestamp
//! - Answering "current snapshot" and "time window series" queries
//! - Bounded, scoped access to the read-only backing store

pub mod config;
pub mod constants;
pub mod display;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod query;
        pub mod reading_normalizer;
        pub mod station_registry;
        pub mod temporal_join;
    }
    pub mod storage;
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{LabeledReading, Metric, Reading, SnapshotRow, SourceKind, Station};
pub use app::storage::{Session, Store};
pub use config::Config;

/// Result type alias for the sensor query engine
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for store access, configuration and presentation
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The backing store was unreachable or a query failed
    #[error("Storage error during {operation}: {source}")]
    Storage {
        operation: String,
        #[source]
        source: sqlx::Error,
    },

    /// A storage call exceeded the configured bound
    #[error("Storage timeout: {operation} exceeded {timeout_ms}ms")]
    StorageTimeout { operation: String, timeout_ms: u128 },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Caller input that cannot fall back to a default
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Rendering output for the terminal failed
    #[error("Output error: {message}")]
    Output { message: String },
}

impl Error {
    /// Create a storage failure for the named operation
    pub fn storage(operation: impl Into<String>, source: sqlx::Error) -> Self {
        Self::Storage {
            operation: operation.into(),
            source,
        }
    }

    /// Create a storage timeout for the named operation
    pub fn storage_timeout(operation: impl Into<String>, timeout: std::time::Duration) -> Self {
        Self::StorageTimeout {
            operation: operation.into(),
            timeout_ms: timeout.as_millis(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Whether a caller may reasonably retry the failed request.
    ///
    /// Only timeouts qualify; the core itself never retries.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StorageTimeout { .. })
    }
}

// Automatic conversions from common error types
impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Output {
            message: format!("JSON serialization failed: {error}"),
        }
    }
}
