//! Conversion of raw `stations` rows into station assignments
//!
//! Upstream data is not validated, so conversion is lenient: only rows that
//! cannot be joined at all (no identifier, no location, no start) are
//! rejected. Everything else is kept and reported through [`RowIssue`].

use crate::app::models::{Station, timestamp_from_unix};
use crate::app::storage::StationRow;

/// Problem found while converting a single station row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowIssue {
    /// A field the join depends on is NULL or unreadable
    MissingField(&'static str),
    /// The interval ends before it starts
    InvertedInterval,
    /// `is_current` disagrees with whether the interval is open
    CurrentFlagMismatch,
}

/// Result of converting one row
#[derive(Debug, Clone)]
pub enum ParsedRow {
    /// Row kept, possibly with warnings
    Kept(Station, Vec<RowIssue>),
    /// Row unusable
    Skipped(RowIssue),
}

/// Convert a raw row into a [`Station`]
///
/// Missing free-text fields become empty strings. A missing `is_current`
/// flag is derived from whether the interval is open.
pub fn parse_station_row(row: StationRow) -> ParsedRow {
    let Some(station_id) = non_blank(row.station_id) else {
        return ParsedRow::Skipped(RowIssue::MissingField("station_id"));
    };
    let Some(location) = non_blank(row.location) else {
        return ParsedRow::Skipped(RowIssue::MissingField("location"));
    };
    let Some(valid_from) = row.from_timestamp_utc.and_then(timestamp_from_unix) else {
        return ParsedRow::Skipped(RowIssue::MissingField("from_timestamp_utc"));
    };

    // An unreadable end is treated as open rather than dropping the station
    let valid_to = row.to_timestamp_utc.and_then(timestamp_from_unix);
    let is_current = row.is_current.map(|flag| flag != 0).unwrap_or(valid_to.is_none());

    let station = Station {
        station_id,
        location,
        sublocation: row.sublocation.unwrap_or_default(),
        description: row.description.unwrap_or_default(),
        valid_from,
        valid_to,
        is_current,
    };

    let mut issues = Vec::new();
    if station.has_inverted_interval() {
        issues.push(RowIssue::InvertedInterval);
    }
    if station.is_current != station.is_open() {
        issues.push(RowIssue::CurrentFlagMismatch);
    }

    ParsedRow::Kept(station, issues)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
