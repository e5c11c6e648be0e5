//! Range request parameters and their normalization
//!
//! Malformed input never fails a request. Unparsable times fall back to the
//! defaults, a reversed range is swapped and an empty location list means
//! every current location. Each fallback is logged at `debug`.

use crate::app::models::TimeWindow;
use crate::app::services::station_registry::StationRegistry;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use tracing::debug;

/// Naive forms accepted after RFC 3339, all read as UTC
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO-8601 instant
///
/// Accepts RFC 3339 with an offset, naive date-times (with `T` or a space,
/// seconds and fractions optional) interpreted as UTC, and bare dates
/// meaning midnight UTC.
pub fn parse_iso_time(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Midnight UTC of the day before `now`
pub fn default_start(now: DateTime<Utc>) -> DateTime<Utc> {
    let yesterday = now.date_naive() - Duration::days(1);
    yesterday
        .and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc())
        .unwrap_or(now)
}

/// Caller-supplied range query, before defaults are applied
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeRequest {
    /// Requested locations; empty means every current location
    pub locations: Vec<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl RangeRequest {
    pub fn new(locations: Vec<String>) -> Self {
        Self {
            locations,
            ..Self::default()
        }
    }

    /// Build a request from raw presentation-layer strings
    ///
    /// Blank location names are dropped and duplicates collapsed, keeping the
    /// first occurrence. Times that do not parse are treated as absent.
    pub fn from_raw<S: AsRef<str>>(locations: &[S], start: Option<&str>, end: Option<&str>) -> Self {
        let mut cleaned: Vec<String> = Vec::with_capacity(locations.len());
        for location in locations {
            let location = location.as_ref().trim();
            if !location.is_empty() && !cleaned.iter().any(|seen| seen == location) {
                cleaned.push(location.to_string());
            }
        }

        Self {
            locations: cleaned,
            start: parse_bound("start", start),
            end: parse_bound("end", end),
        }
    }

    pub fn with_start(mut self, start: DateTime<Utc>) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_end(mut self, end: DateTime<Utc>) -> Self {
        self.end = Some(end);
        self
    }

    /// Apply defaults and substitutions against the registry
    pub fn resolve(&self, registry: &StationRegistry, now: DateTime<Utc>) -> ResolvedRange {
        let start = self.start.unwrap_or_else(|| {
            let start = default_start(now);
            debug!("No start time given, using {}", start);
            start
        });
        let end = self.end.unwrap_or_else(|| {
            debug!("No end time given, using now ({})", now);
            now
        });
        if end < start {
            debug!("Swapping reversed range {} .. {}", start, end);
        }

        let locations = if self.locations.is_empty() {
            let current = registry.current_locations();
            debug!("No locations given, using {} current locations", current.len());
            current
        } else {
            self.locations.clone()
        };

        ResolvedRange {
            locations,
            window: TimeWindow::new(start, end),
        }
    }
}

fn parse_bound(name: &str, raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?;
    let parsed = parse_iso_time(raw);
    if parsed.is_none() {
        debug!("Ignoring unparsable {} time '{}'", name, raw);
    }
    parsed
}

/// Range query with every default applied
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRange {
    pub locations: Vec<String>,
    pub window: TimeWindow,
}
