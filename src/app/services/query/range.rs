//! Location-labeled series over an arbitrary window

use super::params::{RangeRequest, ResolvedRange};
use crate::Result;
use crate::app::models::{LabeledReading, LocationSeries, Metric, Reading};
use crate::app::services::reading_normalizer::read_stream;
use crate::app::services::station_registry::StationRegistry;
use crate::app::services::temporal_join::TemporalJoin;
use crate::app::storage::Session;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

/// Result of a range query, carrying the resolved inputs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeSeries {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub locations: Vec<String>,
    /// Sorted by timestamp, then location, then source kind
    pub readings: Vec<LabeledReading>,
}

impl RangeSeries {
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// One series per resolved location for the given metric
    ///
    /// Locations without data get an empty series so callers can still
    /// show them.
    pub fn series(&self, metric: Metric) -> Vec<LocationSeries> {
        self.locations
            .iter()
            .map(|location| LocationSeries {
                location: location.clone(),
                metric,
                points: self
                    .readings
                    .iter()
                    .filter(|labeled| labeled.metric() == metric && &labeled.location == location)
                    .map(|labeled| (labeled.timestamp_utc(), labeled.value()))
                    .collect(),
            })
            .collect()
    }
}

/// Join, filter and sort readings for a resolved range
///
/// Only intervals of the requested locations take part in the join, so every
/// labeled reading already belongs to one of them.
pub fn range_series_from<I>(registry: &StationRegistry, readings: I, resolved: ResolvedRange) -> RangeSeries
where
    I: IntoIterator<Item = Reading>,
{
    let ResolvedRange { locations, window } = resolved;
    let join = TemporalJoin::new(registry.intervals_for_locations(&locations));

    let mut labeled: Vec<LabeledReading> = join
        .join(
            readings
                .into_iter()
                .filter(|reading| window.contains(reading.timestamp_utc)),
        )
        .collect();

    labeled.sort_by(|a, b| {
        a.timestamp_utc()
            .cmp(&b.timestamp_utc())
            .then_with(|| a.location.cmp(&b.location))
            .then_with(|| a.source_kind().cmp(&b.source_kind()))
    });

    RangeSeries {
        start: window.start,
        end: window.end,
        locations,
        readings: labeled,
    }
}

/// Run a range query against the store
///
/// # Errors
/// * `Error::Storage` or `Error::StorageTimeout` from any storage call
pub async fn range_series(
    session: &mut Session,
    request: &RangeRequest,
    now: DateTime<Utc>,
) -> Result<RangeSeries> {
    let (registry, _) = StationRegistry::load(session).await?;
    let resolved = request.resolve(&registry, now);
    let readings = read_stream(session, Some(resolved.window)).await?;

    let series = range_series_from(&registry, readings, resolved);
    info!(
        "Range {} .. {} over {} locations: {} readings",
        series.start,
        series.end,
        series.locations.len(),
        series.len()
    );
    Ok(series)
}
