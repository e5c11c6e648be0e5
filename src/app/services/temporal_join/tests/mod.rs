//! Tests for the temporal join

use crate::app::models::{Metric, Reading, SourceKind, Station};
use chrono::{DateTime, TimeZone, Utc};


pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
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

pub fn reading(station_id: &str, at: DateTime<Utc>, value: f64) -> Reading {
    Reading {
        station_id: station_id.to_string(),
        timestamp_utc: at,
        metric: Metric::TempC,
        value,
        source_kind: SourceKind::ArchivedFixed,
    }
}
