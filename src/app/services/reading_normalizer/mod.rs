//! Reading normalization across the three backing sources
//!
//! The store keeps readings in three differently shaped tables:
//!
//! - `temperature`: fixed installations, temperature only
//! - `meteoTemps`: weather stations, temperature, humidity and pressure per row
//! - `lastUpdates`: one most-recent value per station and measure type
//!
//! Each table is read on its own and mapped to [`Reading`] by a pure function
//! in [`sources`], which also applies that source's [`plausibility`] rule.
//! The results are unioned without deduplication and in no particular order.

pub mod plausibility;
pub mod sources;
pub mod stats;

#[cfg(test)]
pub mod tests;

pub use stats::{NormalizationStats, SourceStats};

use crate::Result;
use crate::app::models::{Reading, TimeWindow};
use crate::app::storage::{FixedTemperatureRow, LatestRow, Session, WeatherRow};
use sources::{normalize_fixed, normalize_latest, normalize_weather};
use tracing::debug;

/// Lazy union of normalized readings from all three sources
///
/// Rows are fetched up front; mapping to [`Reading`] happens as the stream is
/// consumed. Counters are complete once the stream is exhausted.
#[derive(Debug)]
pub struct ReadingStream {
    fixed: std::vec::IntoIter<FixedTemperatureRow>,
    weather: std::vec::IntoIter<WeatherRow>,
    latest: std::vec::IntoIter<LatestRow>,
    pending: std::vec::IntoIter<Reading>,
    stats: NormalizationStats,
    exhausted: bool,
}

impl ReadingStream {
    /// Stream over rows already read from the store
    pub fn from_rows(
        fixed: Vec<FixedTemperatureRow>,
        weather: Vec<WeatherRow>,
        latest: Vec<LatestRow>,
    ) -> Self {
        Self {
            fixed: fixed.into_iter(),
            weather: weather.into_iter(),
            latest: latest.into_iter(),
            pending: Vec::new().into_iter(),
            stats: NormalizationStats::new(),
            exhausted: false,
        }
    }

    /// Counters so far
    pub fn stats(&self) -> &NormalizationStats {
        &self.stats
    }
}

impl Iterator for ReadingStream {
    type Item = Reading;

    fn next(&mut self) -> Option<Reading> {
        loop {
            if let Some(reading) = self.pending.next() {
                return Some(reading);
            }
            if let Some(row) = self.fixed.next() {
                match normalize_fixed(row, &mut self.stats.fixed) {
                    Some(reading) => return Some(reading),
                    None => continue,
                }
            }
            if let Some(row) = self.weather.next() {
                self.pending = normalize_weather(row, &mut self.stats.weather).into_iter();
                continue;
            }
            if let Some(row) = self.latest.next() {
                match normalize_latest(row, &mut self.stats.latest) {
                    Some(reading) => return Some(reading),
                    None => continue,
                }
            }

            if !self.exhausted {
                self.exhausted = true;
                debug!("Normalized readings: {}", self.stats.summary());
            }
            return None;
        }
    }
}

/// Read all three sources, optionally limited to an inclusive window
///
/// With no window the `latest` source contributes every row.
///
/// # Errors
/// * `Error::Storage` if any source cannot be read
/// * `Error::StorageTimeout` if any read exceeds the query timeout
pub async fn read_stream(session: &mut Session, window: Option<TimeWindow>) -> Result<ReadingStream> {
    let fixed = session.fixed_temperatures(window).await?;
    let weather = session.weather_rows(window).await?;
    let latest = session.latest_rows(window).await?;

    debug!(
        "Fetched {} fixed, {} weather and {} latest rows",
        fixed.len(),
        weather.len(),
        latest.len()
    );

    Ok(ReadingStream::from_rows(fixed, weather, latest))
}

/// Normalized contents of the `lastUpdates` table
pub async fn latest_readings(session: &mut Session) -> Result<Vec<Reading>> {
    let rows = session.latest_rows(None).await?;
    Ok(ReadingStream::from_rows(Vec::new(), Vec::new(), rows).collect())
}

/// The most recent `meteoTemps` row of one station, normalized
///
/// Empty when the station never reported there. An implausible temperature
/// is dropped while the row's other metrics are kept.
pub async fn latest_weather_readings(session: &mut Session, station_id: &str) -> Result<Vec<Reading>> {
    let row = session.latest_weather_row(station_id).await?;
    Ok(ReadingStream::from_rows(Vec::new(), row.into_iter().collect(), Vec::new()).collect())
}
