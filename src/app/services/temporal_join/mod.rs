//! Temporal join of readings to station assignments
//!
//! A reading belongs to a location when its station's assignment interval
//! contains the reading's timestamp:
//!
//! `valid_from <= timestamp_utc` and (`valid_to` is open or `timestamp_utc < valid_to`)
//!
//! Assignments are indexed by station ID, so each reading is compared only
//! against the few intervals of its own device. Overlapping intervals are not
//! resolved: a reading contained in several of them is emitted once per match.

use crate::app::models::{LabeledReading, Reading, Station};
use std::collections::HashMap;

#[cfg(test)]
pub mod tests;

/// Index of assignment intervals keyed by station ID
#[derive(Debug, Clone, Default)]
pub struct TemporalJoin<'a> {
    intervals: HashMap<&'a str, Vec<&'a Station>>,
}

impl<'a> TemporalJoin<'a> {
    /// Index the given assignments
    pub fn new(stations: impl IntoIterator<Item = &'a Station>) -> Self {
        let mut intervals: HashMap<&'a str, Vec<&'a Station>> = HashMap::new();
        for station in stations {
            intervals
                .entry(station.station_id.as_str())
                .or_default()
                .push(station);
        }
        Self { intervals }
    }

    /// Number of distinct stations indexed
    pub fn station_count(&self) -> usize {
        self.intervals.len()
    }

    /// Assignments whose interval contains the reading
    pub fn matches<'r>(&'r self, reading: &'r Reading) -> impl Iterator<Item = &'a Station> + 'r {
        self.intervals
            .get(reading.station_id.as_str())
            .into_iter()
            .flatten()
            .copied()
            .filter(move |station| station.contains(reading.timestamp_utc))
    }

    /// Label a single reading with every location it joins to
    pub fn label(&self, reading: Reading) -> Vec<LabeledReading> {
        self.matches(&reading)
            .map(|station| LabeledReading {
                location: station.location.clone(),
                reading: reading.clone(),
            })
            .collect()
    }

    /// Lazily join a stream of readings
    ///
    /// Readings with no containing interval are dropped.
    pub fn join<'s, I>(&'s self, readings: I) -> impl Iterator<Item = LabeledReading> + 's
    where
        I: IntoIterator<Item = Reading>,
        I::IntoIter: 's,
    {
        readings
            .into_iter()
            .flat_map(move |reading| self.label(reading))
    }
}
