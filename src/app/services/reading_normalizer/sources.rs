//! Schema mapping from each backing table to [`Reading`]
//!
//! Every function here is pure: a raw row goes in, zero or more readings
//! come out, and the per-source counters are updated.

use super::plausibility::{Verdict, check};
use super::stats::SourceStats;
use crate::app::models::{Metric, Reading, SourceKind, timestamp_from_unix};
use crate::app::storage::{FixedTemperatureRow, LatestRow, WeatherRow};
use chrono::{DateTime, Utc};
use tracing::debug;

/// Row of the `temperature` table; yields `temp_c` only
pub fn normalize_fixed(row: FixedTemperatureRow, stats: &mut SourceStats) -> Option<Reading> {
    stats.rows += 1;
    let (station_id, timestamp_utc) = identify(row.station_id, row.timestamp_utc, stats)?;

    emit(
        &station_id,
        timestamp_utc,
        Metric::TempC,
        row.temp_c,
        SourceKind::ArchivedFixed,
        stats,
    )
}

/// Row of the `meteoTemps` table; yields up to three readings
///
/// Each metric is judged on its own, so an implausible temperature does not
/// take the row's humidity and pressure with it.
pub fn normalize_weather(row: WeatherRow, stats: &mut SourceStats) -> Vec<Reading> {
    stats.rows += 1;
    let Some((station_id, timestamp_utc)) = identify(row.station_id, row.timestamp_utc, stats)
    else {
        return Vec::new();
    };

    [
        (Metric::TempC, row.temp_c),
        (Metric::HumidityPct, row.relative_hum_pct),
        (Metric::PressureHpa, row.pressure_hpa),
    ]
    .into_iter()
    .filter_map(|(metric, value)| {
        emit(
            &station_id,
            timestamp_utc,
            metric,
            value,
            SourceKind::ArchivedWeather,
            stats,
        )
    })
    .collect()
}

/// Row of the `lastUpdates` table
pub fn normalize_latest(row: LatestRow, stats: &mut SourceStats) -> Option<Reading> {
    stats.rows += 1;
    let (station_id, timestamp_utc) = identify(row.station_id, row.timestamp_utc, stats)?;

    let measure_type = row.measure_type.unwrap_or_default();
    let Ok(metric) = measure_type.parse::<Metric>() else {
        stats.unknown_measure_types += 1;
        debug!(
            "Skipping latest value of {} with unknown measure type '{}'",
            station_id, measure_type
        );
        return None;
    };

    emit(
        &station_id,
        timestamp_utc,
        metric,
        row.measure_value,
        SourceKind::Latest,
        stats,
    )
}

fn identify(
    station_id: Option<String>,
    timestamp: Option<f64>,
    stats: &mut SourceStats,
) -> Option<(String, DateTime<Utc>)> {
    match (station_id, timestamp.and_then(timestamp_from_unix)) {
        (Some(station_id), Some(timestamp_utc)) => Some((station_id, timestamp_utc)),
        _ => {
            stats.unusable_rows += 1;
            None
        }
    }
}

fn emit(
    station_id: &str,
    timestamp_utc: DateTime<Utc>,
    metric: Metric,
    value: Option<f64>,
    source_kind: SourceKind,
    stats: &mut SourceStats,
) -> Option<Reading> {
    match check(source_kind, metric, value) {
        Verdict::Keep(value) => {
            stats.readings += 1;
            Some(Reading {
                station_id: station_id.to_string(),
                timestamp_utc,
                metric,
                value,
                source_kind,
            })
        }
        Verdict::Missing => {
            stats.missing_values += 1;
            None
        }
        Verdict::Implausible => {
            stats.implausible_values += 1;
            None
        }
    }
}
