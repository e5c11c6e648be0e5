//! Local-time rendering for presentation
//!
//! Instants are stored and queried in UTC. Rendering converts them to the
//! configured IANA timezone; an unknown zone renders in UTC and tags the
//! output with " UTC" so the reader is not misled about the offset.

use crate::constants::FALLBACK_TIME_FORMAT;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::debug;

/// Render an instant in a timezone using a strftime-style format
///
/// An empty or malformed format falls back to `%Y-%m-%d %H:%M:%S`.
pub fn render_local_time(instant: DateTime<Utc>, format: &str, timezone: &str) -> String {
    let format = usable_format(format);

    match timezone.parse::<Tz>() {
        Ok(tz) => instant.with_timezone(&tz).format(format).to_string(),
        Err(_) => {
            debug!("Unknown timezone '{}', rendering in UTC", timezone);
            format!("{} UTC", instant.format(format))
        }
    }
}

/// Render an optional instant, with a placeholder for missing values
pub fn render_optional_time(
    instant: Option<DateTime<Utc>>,
    format: &str,
    timezone: &str,
) -> String {
    instant
        .map(|at| render_local_time(at, format, timezone))
        .unwrap_or_else(|| "-".to_string())
}

fn usable_format(format: &str) -> &str {
    if format.trim().is_empty() {
        return FALLBACK_TIME_FORMAT;
    }
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        debug!("Invalid time format '{}', using {}", format, FALLBACK_TIME_FORMAT);
        return FALLBACK_TIME_FORMAT;
    }
    format
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 1, 12, 30, 15).unwrap()
    }

    #[test]
    fn test_renders_in_named_timezone() {
        // Berlin is UTC+2 in summer
        assert_eq!(
            render_local_time(instant(), "%H:%M:%S", "Europe/Berlin"),
            "14:30:15"
        );
        assert_eq!(
            render_local_time(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(), "%H:%M", "Europe/Berlin"),
            "13:00"
        );
    }

    #[test]
    fn test_unknown_timezone_falls_back_to_utc() {
        assert_eq!(
            render_local_time(instant(), "%H:%M:%S", "Mars/Olympus_Mons"),
            "12:30:15 UTC"
        );
        assert_eq!(render_local_time(instant(), "%H:%M", ""), "12:30 UTC");
    }

    #[test]
    fn test_empty_or_invalid_format_falls_back() {
        assert_eq!(
            render_local_time(instant(), "", "UTC"),
            "2024-07-01 12:30:15"
        );
        assert_eq!(
            render_local_time(instant(), "%Y-%N-%D %H:%m:%s %Q", "UTC"),
            "2024-07-01 12:30:15"
        );
    }

    #[test]
    fn test_missing_instant_placeholder() {
        assert_eq!(render_optional_time(None, "%H:%M", "UTC"), "-");
        assert_eq!(render_optional_time(Some(instant()), "%H:%M", "UTC"), "12:30");
    }
}
