//! Normalization statistics

use crate::app::models::SourceKind;

/// Counters for one backing source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceStats {
    /// Raw rows consumed
    pub rows: usize,
    /// Readings produced
    pub readings: usize,
    /// Rows without a station ID or a readable timestamp
    pub unusable_rows: usize,
    /// Values that were NULL or non-finite
    pub missing_values: usize,
    /// Values rejected by the plausibility rule
    pub implausible_values: usize,
    /// `lastUpdates` rows with a measure type no metric maps to
    pub unknown_measure_types: usize,
}

impl SourceStats {
    /// Total values discarded
    pub fn dropped(&self) -> usize {
        self.missing_values + self.implausible_values + self.unknown_measure_types
    }
}

/// Counters for all three sources of one read
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizationStats {
    pub fixed: SourceStats,
    pub weather: SourceStats,
    pub latest: SourceStats,
}

impl NormalizationStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counters of one source
    pub fn source(&self, kind: SourceKind) -> &SourceStats {
        match kind {
            SourceKind::ArchivedFixed => &self.fixed,
            SourceKind::ArchivedWeather => &self.weather,
            SourceKind::Latest => &self.latest,
        }
    }

    /// Readings produced across all sources
    pub fn total_readings(&self) -> usize {
        self.fixed.readings + self.weather.readings + self.latest.readings
    }

    pub fn summary(&self) -> String {
        [
            SourceKind::ArchivedFixed,
            SourceKind::ArchivedWeather,
            SourceKind::Latest,
        ]
        .into_iter()
        .map(|kind| {
            let stats = self.source(kind);
            format!(
                "{}: {} rows -> {} readings ({} unusable rows, {} missing, {} implausible, {} unknown)",
                kind,
                stats.rows,
                stats.readings,
                stats.unusable_rows,
                stats.missing_values,
                stats.implausible_values,
                stats.unknown_measure_types
            )
        })
        .collect::<Vec<_>>()
        .join("; ")
    }
}
