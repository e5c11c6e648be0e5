//! Data models for sensor history queries
//!
//! This module contains the core data structures for representing station
//! assignments and normalized readings, plus the derived views produced by
//! the query services.

use crate::constants::metrics;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// =============================================================================
// Station Assignment Structure
// =============================================================================

/// A physical sensing device assigned to a location for a time interval
///
/// The validity interval is half-open, `[valid_from, valid_to)`. An open
/// `valid_to` means the assignment is still in force.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Station {
    /// Identifier of the physical device
    pub station_id: String,

    /// Display grouping key (e.g., "Outside", "Kitchen")
    pub location: String,

    /// Free-text refinement of the location
    pub sublocation: String,

    /// Free-text description of the device
    pub description: String,

    /// Start of the assignment (inclusive)
    pub valid_from: DateTime<Utc>,

    /// End of the assignment (exclusive), `None` while still valid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_to: Option<DateTime<Utc>>,

    /// True iff the assignment is still in force
    pub is_current: bool,
}

impl Station {
    /// Whether the assignment interval contains the instant
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        if at < self.valid_from {
            return false;
        }
        match self.valid_to {
            Some(valid_to) => at < valid_to,
            None => true,
        }
    }

    /// Whether the assignment has no end
    pub fn is_open(&self) -> bool {
        self.valid_to.is_none()
    }

    /// Whether the stored interval ends before it starts
    pub fn has_inverted_interval(&self) -> bool {
        matches!(self.valid_to, Some(valid_to) if valid_to < self.valid_from)
    }
}

// =============================================================================
// Reading Structures
// =============================================================================

/// Quantity measured by a reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    TempC,
    HumidityPct,
    PressureHpa,
}

impl Metric {
    /// Name as stored in the backing store
    pub fn as_str(self) -> &'static str {
        match self {
            Metric::TempC => metrics::TEMP_C,
            Metric::HumidityPct => metrics::HUMIDITY_PCT,
            Metric::PressureHpa => metrics::PRESSURE_HPA,
        }
    }

    /// Unit suffix for display
    pub fn unit(self) -> &'static str {
        match self {
            Metric::TempC => "°C",
            Metric::HumidityPct => "%",
            Metric::PressureHpa => "hPa",
        }
    }
}

impl FromStr for Metric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            metrics::TEMP_C => Ok(Metric::TempC),
            metrics::HUMIDITY_PCT => Ok(Metric::HumidityPct),
            metrics::PRESSURE_HPA => Ok(Metric::PressureHpa),
            other => Err(Error::invalid_input(format!(
                "Unknown metric '{}': must be {}, {} or {}",
                other,
                metrics::TEMP_C,
                metrics::HUMIDITY_PCT,
                metrics::PRESSURE_HPA
            ))),
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Backing source a reading came from
///
/// Declaration order is the tie-break order used when sorting range results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Regularly sampled readings from fixed installations
    ArchivedFixed,
    /// Regularly sampled readings from weather-station-class devices
    ArchivedWeather,
    /// Single most recent value per station and metric
    Latest,
}

impl SourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SourceKind::ArchivedFixed => "archived_fixed",
            SourceKind::ArchivedWeather => "archived_weather",
            SourceKind::Latest => "latest",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single normalized measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub station_id: String,
    pub timestamp_utc: DateTime<Utc>,
    pub metric: Metric,
    pub value: f64,
    pub source_kind: SourceKind,
}

/// A reading attributed to the location its station served at the time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledReading {
    pub location: String,
    #[serde(flatten)]
    pub reading: Reading,
}

impl LabeledReading {
    pub fn timestamp_utc(&self) -> DateTime<Utc> {
        self.reading.timestamp_utc
    }

    pub fn metric(&self) -> Metric {
        self.reading.metric
    }

    pub fn value(&self) -> f64 {
        self.reading.value
    }

    pub fn source_kind(&self) -> SourceKind {
        self.reading.source_kind
    }
}

// =============================================================================
// Query Views
// =============================================================================

/// Current values for one active location
///
/// Missing values stay `None` so every active location keeps its row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRow {
    pub location: String,
    pub temp_c: Option<f64>,
    pub humidity_pct: Option<f64>,
    pub timestamp_utc: Option<DateTime<Utc>>,
}

/// Ordered values of one metric for one location across station tenures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSeries {
    pub location: String,
    pub metric: Metric,
    pub points: Vec<(DateTime<Utc>, f64)>,
}

impl LocationSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Inclusive time window with `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Build a window, swapping reversed bounds
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        if end < start {
            Self {
                start: end,
                end: start,
            }
        } else {
            Self { start, end }
        }
    }

    /// Whether the instant lies within the window, bounds included
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at <= self.end
    }
}

// =============================================================================
// Timestamp Conversion
// =============================================================================

/// Convert stored unix seconds to an instant
///
/// The fractional part is kept to the microsecond, the finest step a stored
/// `f64` resolves at current epochs, so sub-millisecond readings stay on the
/// correct side of an interval boundary. Returns `None` for non-finite or
/// out-of-range values.
pub fn timestamp_from_unix(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    let whole = seconds.floor();
    if whole < i64::MIN as f64 || whole >= i64::MAX as f64 {
        return None;
    }

    let mut secs = whole as i64;
    let mut micros = ((seconds - whole) * 1e6).round() as u32;
    if micros >= 1_000_000 {
        secs = secs.checked_add(1)?;
        micros = 0;
    }
    DateTime::from_timestamp(secs, micros * 1_000)
}

/// Convert an instant to unix seconds as stored in the backing store
pub fn timestamp_to_unix(at: DateTime<Utc>) -> f64 {
    at.timestamp() as f64 + f64::from(at.timestamp_subsec_nanos()) / 1e9
}
