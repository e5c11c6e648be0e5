//! Location lookups over the registry
//!
//! Results are deterministic: locations come back sorted, and station lists
//! are ordered by location, then start of interval, then station ID.

use super::StationRegistry;
use crate::app::models::Station;
use chrono::{DateTime, Utc};
use std::collections::{BTreeSet, HashSet};

impl StationRegistry {
    /// All assignments in load order
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// Every distinct location served by a current station, sorted
    pub fn current_locations(&self) -> Vec<String> {
        self.stations
            .iter()
            .filter(|station| station.is_current)
            .map(|station| station.location.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Every assignment, current or historical, for the requested locations
    ///
    /// An empty request yields nothing; substituting "all current locations"
    /// is the caller's decision. Unknown names simply match no station.
    pub fn intervals_for_locations(&self, locations: &[String]) -> Vec<&Station> {
        if locations.is_empty() {
            return Vec::new();
        }

        let wanted: HashSet<&str> = locations.iter().map(String::as_str).collect();
        let mut matched: Vec<&Station> = self
            .stations
            .iter()
            .filter(|station| wanted.contains(station.location.as_str()))
            .collect();

        matched.sort_by(|a, b| {
            a.location
                .cmp(&b.location)
                .then(a.valid_from.cmp(&b.valid_from))
                .then_with(|| a.station_id.cmp(&b.station_id))
        });
        matched
    }

    /// Assignments of a location whose interval contains the instant
    pub fn stations_serving(&self, location: &str, at: DateTime<Utc>) -> Vec<&Station> {
        let mut serving: Vec<&Station> = self
            .stations
            .iter()
            .filter(|station| station.location == location && station.contains(at))
            .collect();
        serving.sort_by(|a, b| a.station_id.cmp(&b.station_id));
        serving
    }

    /// Current assignments of a location, ordered by station ID
    pub fn current_stations(&self, location: &str) -> Vec<&Station> {
        let mut current: Vec<&Station> = self
            .stations
            .iter()
            .filter(|station| station.is_current && station.location == location)
            .collect();
        current.sort_by(|a, b| a.station_id.cmp(&b.station_id));
        current
    }
}
