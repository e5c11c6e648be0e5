//! Tests for the snapshot query

use super::*;
use crate::app::models::{Metric, SourceKind};
use crate::app::services::query::snapshot::missing_metrics;
use crate::app::services::query::{snapshot, snapshot_from};
use crate::app::storage::tests::FixtureDb;
use std::collections::HashMap;

fn latest(station_id: &str, at: DateTime<Utc>, metric: Metric, value: f64) -> Reading {
    reading(station_id, at, metric, value, SourceKind::Latest)
}

#[test]
fn test_one_row_per_active_location_sorted() {
    let rows = snapshot_from(
        &registry(),
        &[
            latest("StationA", t0(), Metric::TempC, 8.0),
            latest("StationA", t0(), Metric::HumidityPct, 70.0),
            latest("StationC", t0(), Metric::TempC, 14.0),
        ],
        &HashMap::new(),
    );

    let locations: Vec<&str> = rows.iter().map(|r| r.location.as_str()).collect();
    assert_eq!(locations, vec!["Kitchen", "Outside"]);

    // Kitchen has no values yet and still gets a row
    assert_eq!(rows[0].temp_c, None);
    assert_eq!(rows[0].humidity_pct, None);
    assert_eq!(rows[0].timestamp_utc, None);

    assert_eq!(rows[1].temp_c, Some(8.0));
    assert_eq!(rows[1].humidity_pct, Some(70.0));
    assert_eq!(rows[1].timestamp_utc, Some(t0()));
}

#[test]
fn test_timestamp_falls_back_to_humidity() {
    let rows = snapshot_from(
        &registry(),
        &[latest("StationB", t0() + hours(1), Metric::HumidityPct, 45.0)],
        &HashMap::new(),
    );
    assert_eq!(rows[0].location, "Kitchen");
    assert_eq!(rows[0].temp_c, None);
    assert_eq!(rows[0].timestamp_utc, Some(t0() + hours(1)));
}

#[test]
fn test_most_recent_station_wins_with_id_tie_break() {
    let registry = StationRegistry::from_stations(vec![
        station("Z", "Outside", t0(), None),
        station("Y", "Outside", t0(), None),
        station("X", "Outside", t0(), None),
    ]);
    let rows = snapshot_from(
        &registry,
        &[
            latest("X", t0(), Metric::TempC, 1.0),
            latest("Z", t0() + hours(1), Metric::TempC, 3.0),
            latest("Y", t0() + hours(1), Metric::TempC, 2.0),
            latest("X", t0() + hours(2), Metric::HumidityPct, 60.0),
        ],
        &HashMap::new(),
    );

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].temp_c, Some(2.0));
    assert_eq!(rows[0].humidity_pct, Some(60.0));
    assert_eq!(rows[0].timestamp_utc, Some(t0() + hours(1)));
}

#[test]
fn test_fallback_only_fills_missing_metrics() {
    let latest_values = [latest("StationA", t0() + hours(5), Metric::TempC, 8.0)];
    assert_eq!(missing_metrics("StationA", &latest_values), vec![Metric::HumidityPct]);

    let mut fallback = HashMap::new();
    fallback.insert(
        "StationA".to_string(),
        vec![
            reading("StationA", t0(), Metric::TempC, 99.0, SourceKind::ArchivedWeather),
            reading("StationA", t0(), Metric::HumidityPct, 62.0, SourceKind::ArchivedWeather),
        ],
    );

    let rows = snapshot_from(&registry(), &latest_values, &fallback);
    let outside = rows.iter().find(|r| r.location == "Outside").unwrap();
    assert_eq!(outside.temp_c, Some(8.0));
    assert_eq!(outside.humidity_pct, Some(62.0));
    assert_eq!(outside.timestamp_utc, Some(t0() + hours(5)));
}

#[tokio::test]
async fn test_snapshot_against_store() {
    let fixture = FixtureDb::new().await;
    fixture
        .station("Fixed", "Kitchen", t0(), None)
        .await
        .station("Meteo", "Outside", t0(), None)
        .await
        .station("Retired", "Cellar", t0() - Duration::days(30), Some(t0()))
        .await
        .latest("Fixed", t0() + hours(1), "temp_c", 21.0)
        .await
        .latest("Fixed", t0() + hours(1), "humidity_pct", 40.0)
        .await
        .latest("Retired", t0() - hours(1), "temp_c", 11.0)
        .await
        .weather("Meteo", t0(), 5.0, 1000.0, 80.0)
        .await
        .weather("Meteo", t0() + hours(2), -120.0, 1001.0, 75.0)
        .await;

    let store = fixture.store().await;
    let mut session = store.session().await.unwrap();
    let rows = snapshot(&mut session).await.unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].location, "Kitchen");
    assert_eq!(rows[0].temp_c, Some(21.0));
    assert_eq!(rows[0].humidity_pct, Some(40.0));

    // Newest archived weather row, implausible temperature left null
    assert_eq!(rows[1].location, "Outside");
    assert_eq!(rows[1].temp_c, None);
    assert_eq!(rows[1].humidity_pct, Some(75.0));
    assert_eq!(rows[1].timestamp_utc, Some(t0() + hours(2)));
}
