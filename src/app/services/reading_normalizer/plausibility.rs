//! Per-source plausibility rules
//!
//! Sensors report sentinel values when they fail (fixed installations drop
//! to around -40, weather stations to below -100). Values at or beneath the
//! source's floor are discarded. The `latest` source has no floor.

use crate::app::models::{Metric, SourceKind};
use crate::constants::plausibility::{FIXED_MIN_TEMP_C, WEATHER_MIN_TEMP_C};

/// Verdict on a single raw value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    Keep(f64),
    /// NULL, NaN or infinite
    Missing,
    /// Outside the source's plausible range
    Implausible,
}

/// Lowest temperature a source can report, exclusive
pub fn temperature_floor(source: SourceKind) -> Option<f64> {
    match source {
        SourceKind::ArchivedFixed => Some(FIXED_MIN_TEMP_C),
        SourceKind::ArchivedWeather => Some(WEATHER_MIN_TEMP_C),
        SourceKind::Latest => None,
    }
}

/// Judge a raw value for one metric of one source
pub fn check(source: SourceKind, metric: Metric, value: Option<f64>) -> Verdict {
    let Some(value) = value.filter(|v| v.is_finite()) else {
        return Verdict::Missing;
    };

    match (metric, temperature_floor(source)) {
        (Metric::TempC, Some(floor)) if value <= floor => Verdict::Implausible,
        _ => Verdict::Keep(value),
    }
}
