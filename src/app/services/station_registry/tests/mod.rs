//! Shared test utilities and fixtures for station registry tests

use crate::app::models::Station;
use crate::app::services::station_registry::StationRegistry;
use crate::app::storage::StationRow;
use chrono::{DateTime, Duration, TimeZone, Utc};


/// Start of the fixture timeline
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
}

/// Create a test station; `valid_to = None` makes it current
pub fn create_test_station(
    station_id: &str,
    location: &str,
    valid_from: DateTime<Utc>,
    valid_to: Option<DateTime<Utc>>,
) -> Station {
    Station {
        station_id: station_id.to_string(),
        location: location.to_string(),
        sublocation: String::new(),
        description: format!("Station {station_id}"),
        valid_from,
        valid_to,
        is_current: valid_to.is_none(),
    }
}

/// Raw row as the store returns it
pub fn create_test_row(
    station_id: Option<&str>,
    location: Option<&str>,
    from: Option<f64>,
    to: Option<f64>,
    is_current: Option<i64>,
) -> StationRow {
    StationRow {
        station_id: station_id.map(str::to_string),
        location: location.map(str::to_string),
        sublocation: Some("sub".to_string()),
        description: Some("desc".to_string()),
        from_timestamp_utc: from,
        to_timestamp_utc: to,
        is_current,
    }
}

/// Registry where "Outside" changed devices and "Cellar" was retired
///
/// * `StationA` serves "Outside" from t0, open
/// * `StationOld` served "Outside" for the 30 days before t0
/// * `StationB` serves "Kitchen" from t0, open
/// * `StationC` served "Cellar" for 15 days from t0
pub fn create_test_registry() -> StationRegistry {
    StationRegistry::from_stations(vec![
        create_test_station("StationB", "Kitchen", t0(), None),
        create_test_station("StationA", "Outside", t0(), None),
        create_test_station(
            "StationOld",
            "Outside",
            t0() - Duration::days(30),
            Some(t0()),
        ),
        create_test_station("StationC", "Cellar", t0(), Some(t0() + Duration::days(15))),
    ])
}
