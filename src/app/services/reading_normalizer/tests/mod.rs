//! Shared row builders for normalization tests

use crate::app::models::timestamp_to_unix;
use crate::app::storage::{FixedTemperatureRow, LatestRow, WeatherRow};
use chrono::{DateTime, TimeZone, Utc};


pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
}

pub fn fixed_row(station_id: &str, temp_c: Option<f64>) -> FixedTemperatureRow {
    FixedTemperatureRow {
        timestamp_utc: Some(timestamp_to_unix(t0())),
        station_id: Some(station_id.to_string()),
        temp_c,
    }
}

pub fn weather_row(
    station_id: &str,
    temp_c: Option<f64>,
    relative_hum_pct: Option<f64>,
    pressure_hpa: Option<f64>,
) -> WeatherRow {
    WeatherRow {
        station_id: Some(station_id.to_string()),
        temp_c,
        pressure_hpa,
        relative_hum_pct,
        timestamp_utc: Some(timestamp_to_unix(t0())),
    }
}

pub fn latest_row(station_id: &str, measure_type: &str, value: Option<f64>) -> LatestRow {
    LatestRow {
        station_id: Some(station_id.to_string()),
        timestamp_utc: Some(timestamp_to_unix(t0())),
        measure_type: Some(measure_type.to_string()),
        measure_value: value,
    }
}
