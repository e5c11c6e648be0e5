//! Station registry loading from the backing store

use super::StationRegistry;
use super::metadata::LoadStats;
use super::parser::{ParsedRow, RowIssue, parse_station_row};
use crate::Result;
use crate::app::storage::{Session, StationRow};
use std::time::Instant;
use tracing::{debug, info, warn};

impl StationRegistry {
    /// Load every station assignment in one round trip
    ///
    /// Suspicious rows are logged at `warn`. Rows with an inverted interval
    /// are kept; they simply never contain any instant.
    ///
    /// # Errors
    /// * `Error::Storage` if the `stations` table cannot be read
    /// * `Error::StorageTimeout` if the read exceeds the query timeout
    pub async fn load(session: &mut Session) -> Result<(Self, LoadStats)> {
        let start_time = Instant::now();
        let rows = session.stations().await?;

        let (registry, mut stats) = Self::from_rows(rows);
        stats.load_duration = start_time.elapsed();

        if stats.has_warnings() {
            info!("{}", stats.summary());
        } else {
            debug!("{}", stats.summary());
        }

        Ok((registry, stats))
    }

    /// Build a registry from raw rows, collecting load statistics
    pub fn from_rows(rows: Vec<StationRow>) -> (Self, LoadStats) {
        let mut stats = LoadStats::new();
        stats.rows_read = rows.len();

        let mut stations = Vec::with_capacity(rows.len());
        for row in rows {
            match parse_station_row(row) {
                ParsedRow::Kept(station, issues) => {
                    for issue in &issues {
                        match issue {
                            RowIssue::InvertedInterval => {
                                stats.inverted_intervals += 1;
                                warn!(
                                    "Station {} at '{}' ends before it starts ({} > {:?})",
                                    station.station_id,
                                    station.location,
                                    station.valid_from,
                                    station.valid_to
                                );
                            }
                            RowIssue::CurrentFlagMismatch => {
                                stats.inconsistent_current_flags += 1;
                                warn!(
                                    "Station {} at '{}' has is_current={} but valid_to={:?}",
                                    station.station_id,
                                    station.location,
                                    station.is_current,
                                    station.valid_to
                                );
                            }
                            RowIssue::MissingField(_) => {}
                        }
                    }
                    stations.push(station);
                }
                ParsedRow::Skipped(issue) => {
                    stats.rows_skipped += 1;
                    warn!("Skipping station row: {:?}", issue);
                }
            }
        }

        stats.stations_loaded = stations.len();
        (Self::from_stations(stations), stats)
    }
}
