//! Station registry metadata and statistics tracking
//!
//! This module defines the data structures for tracking how the registry was
//! loaded and what it contains.

use std::time::Instant;

/// Statistics about the station registry loading process
#[derive(Debug, Clone, Default)]
pub struct LoadStats {
    /// Number of rows read from the `stations` table
    pub rows_read: usize,

    /// Number of assignments kept
    pub stations_loaded: usize,

    /// Rows skipped because an identifier, location or start was missing
    pub rows_skipped: usize,

    /// Kept assignments whose end precedes their start
    pub inverted_intervals: usize,

    /// Kept assignments whose `is_current` flag disagrees with an open end
    pub inconsistent_current_flags: usize,

    /// Time taken to load the registry
    pub load_duration: std::time::Duration,
}

impl LoadStats {
    /// Create new empty load statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if any row looked suspicious
    pub fn has_warnings(&self) -> bool {
        self.rows_skipped > 0 || self.inverted_intervals > 0 || self.inconsistent_current_flags > 0
    }

    /// Get a summary string of the loading process
    pub fn summary(&self) -> String {
        format!(
            "Read {} station rows, loaded {} ({} skipped, {} inverted, {} flag mismatches) in {:.3}s",
            self.rows_read,
            self.stations_loaded,
            self.rows_skipped,
            self.inverted_intervals,
            self.inconsistent_current_flags,
            self.load_duration.as_secs_f64()
        )
    }
}

/// Snapshot of what a registry holds
#[derive(Debug, Clone)]
pub struct RegistryMetadata {
    /// Number of assignment records
    pub interval_count: usize,

    /// Number of distinct devices
    pub station_count: usize,

    /// Number of assignments flagged current
    pub current_count: usize,

    /// When the registry was built
    pub load_time: Instant,
}
