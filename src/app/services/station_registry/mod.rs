//! Station registry service for location and validity interval lookups
//!
//! This module holds every station assignment read from the `stations` table,
//! current and historical, and indexes them by station ID so the temporal join
//! only ever scans the handful of intervals belonging to one device.

use crate::app::models::Station;
use std::collections::HashMap;
use std::time::Instant;

pub mod loader;
pub mod metadata;
pub mod parser;
pub mod query;

#[cfg(test)]
pub mod tests;

// Re-export key types for convenience
pub use metadata::{LoadStats, RegistryMetadata};

/// Registry of station assignments
///
/// The registry is the sole authority on interval data. It is built once per
/// query and only read afterwards.
#[derive(Debug, Clone)]
pub struct StationRegistry {
    /// Assignments in load order
    pub(crate) stations: Vec<Station>,

    /// Positions in `stations` grouped by station ID
    pub(crate) by_station_id: HashMap<String, Vec<usize>>,

    /// Timestamp when the registry was built
    pub(crate) load_time: Instant,
}

impl StationRegistry {
    /// Create a new empty station registry
    pub fn new() -> Self {
        Self::from_stations(Vec::new())
    }

    /// Build a registry from already-parsed assignments
    pub fn from_stations(stations: Vec<Station>) -> Self {
        let mut by_station_id: HashMap<String, Vec<usize>> = HashMap::new();
        for (position, station) in stations.iter().enumerate() {
            by_station_id
                .entry(station.station_id.clone())
                .or_default()
                .push(position);
        }

        Self {
            stations,
            by_station_id,
            load_time: Instant::now(),
        }
    }

    /// Every assignment interval of one device
    pub fn intervals_for_station(&self, station_id: &str) -> Vec<&Station> {
        self.by_station_id
            .get(station_id)
            .map(|positions| positions.iter().map(|&i| &self.stations[i]).collect())
            .unwrap_or_default()
    }

    /// Check if a device has any assignment
    pub fn contains_station(&self, station_id: &str) -> bool {
        self.by_station_id.contains_key(station_id)
    }

    /// Number of assignment records
    pub fn interval_count(&self) -> usize {
        self.stations.len()
    }

    /// Number of distinct devices
    pub fn station_count(&self) -> usize {
        self.by_station_id.len()
    }

    /// Get registry metadata
    pub fn metadata(&self) -> RegistryMetadata {
        RegistryMetadata {
            interval_count: self.interval_count(),
            station_count: self.station_count(),
            current_count: self.stations.iter().filter(|s| s.is_current).count(),
            load_time: self.load_time,
        }
    }
}

impl Default for StationRegistry {
    fn default() -> Self {
        Self::new()
    }
}
