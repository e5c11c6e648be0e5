//! Shared fixtures for query tests

use crate::app::models::{Metric, Reading, SourceKind, Station};
use crate::app::services::station_registry::StationRegistry;
use chrono::{DateTime, Duration, TimeZone, Utc};

pub mod snapshot_tests;

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
}

pub fn hours(n: i64) -> Duration {
    Duration::hours(n)
}

pub fn station(
    station_id: &str,
    location: &str,
    valid_from: DateTime<Utc>,
    valid_to: Option<DateTime<Utc>>,
) -> Station {
    Station {
        station_id: station_id.to_string(),
        location: location.to_string(),
        sublocation: String::new(),
        description: String::new(),
        valid_from,
        valid_to,
        is_current: valid_to.is_none(),
    }
}

pub fn reading(
    station_id: &str,
    at: DateTime<Utc>,
    metric: Metric,
    value: f64,
    source_kind: SourceKind,
) -> Reading {
    Reading {
        station_id: station_id.to_string(),
        timestamp_utc: at,
        metric,
        value,
        source_kind,
    }
}

/// "Outside" served by A (current), "Kitchen" by B (current), "Cellar" by C
/// for the first 15 days only
pub fn registry() -> StationRegistry {
    StationRegistry::from_stations(vec![
        station("StationA", "Outside", t0(), None),
        station("StationB", "Kitchen", t0(), None),
        station("StationC", "Cellar", t0(), Some(t0() + Duration::days(15))),
    ])
}
