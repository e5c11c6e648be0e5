//! Current values for every active location

use crate::Result;
use crate::app::models::{Metric, Reading, SnapshotRow};
use crate::app::services::reading_normalizer::{latest_readings, latest_weather_readings};
use crate::app::services::station_registry::StationRegistry;
use crate::app::storage::Session;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info};

/// Metrics shown in a snapshot
pub const SNAPSHOT_METRICS: [Metric; 2] = [Metric::TempC, Metric::HumidityPct];

/// Snapshot metrics a station has no `latest` value for
pub fn missing_metrics(station_id: &str, latest: &[Reading]) -> Vec<Metric> {
    SNAPSHOT_METRICS
        .into_iter()
        .filter(|metric| {
            !latest
                .iter()
                .any(|r| r.station_id == station_id && r.metric == *metric)
        })
        .collect()
}

/// Build snapshot rows from latest values and per-station fallbacks
///
/// `fallback` maps a station ID to its normalized most recent archived
/// weather row. A fallback value is used only for metrics the station has no
/// latest value for.
pub fn snapshot_from(
    registry: &StationRegistry,
    latest: &[Reading],
    fallback: &HashMap<String, Vec<Reading>>,
) -> Vec<SnapshotRow> {
    registry
        .current_locations()
        .into_iter()
        .map(|location| {
            let mut candidates: Vec<&Reading> = Vec::new();
            for station in registry.current_stations(&location) {
                let own: Vec<&Reading> = latest
                    .iter()
                    .filter(|r| r.station_id == station.station_id)
                    .collect();
                let missing = missing_metrics(&station.station_id, latest);

                candidates.extend(own);
                if let Some(rows) = fallback.get(&station.station_id) {
                    candidates.extend(rows.iter().filter(|r| missing.contains(&r.metric)));
                }
            }

            let temp = most_recent(&candidates, Metric::TempC);
            let humidity = most_recent(&candidates, Metric::HumidityPct);

            SnapshotRow {
                location,
                temp_c: temp.map(|r| r.value),
                humidity_pct: humidity.map(|r| r.value),
                timestamp_utc: temp.or(humidity).map(|r| r.timestamp_utc),
            }
        })
        .collect()
}

/// Latest reading of a metric; equal timestamps go to the lowest station ID
fn most_recent<'r>(candidates: &[&'r Reading], metric: Metric) -> Option<&'r Reading> {
    candidates
        .iter()
        .copied()
        .filter(|r| r.metric == metric)
        .max_by(|a, b| match a.timestamp_utc.cmp(&b.timestamp_utc) {
            Ordering::Equal => b.station_id.cmp(&a.station_id),
            other => other,
        })
}

/// Run a snapshot query against the store
///
/// # Errors
/// * `Error::Storage` or `Error::StorageTimeout` from any storage call
pub async fn snapshot(session: &mut Session) -> Result<Vec<SnapshotRow>> {
    let (registry, _) = StationRegistry::load(session).await?;
    let latest = latest_readings(session).await?;

    let current_ids: BTreeSet<&str> = registry
        .stations()
        .iter()
        .filter(|station| station.is_current)
        .map(|station| station.station_id.as_str())
        .collect();

    let mut fallback = HashMap::new();
    for station_id in current_ids {
        if missing_metrics(station_id, &latest).is_empty() {
            continue;
        }
        let readings = latest_weather_readings(session, station_id).await?;
        if !readings.is_empty() {
            debug!("Using archived weather row as fallback for {}", station_id);
            fallback.insert(station_id.to_string(), readings);
        }
    }

    let rows = snapshot_from(&registry, &latest, &fallback);
    info!("Snapshot of {} active locations", rows.len());
    Ok(rows)
}
