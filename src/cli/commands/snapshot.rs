//! Snapshot command: current values per active location

use super::shared::format_value;
use crate::Result;
use crate::app::models::{Metric, SnapshotRow};
use crate::app::services::query::{self, RangeRequest};
use crate::app::storage::Store;
use crate::cli::args::{OutputFormat, SnapshotArgs};
use crate::config::{Config, DisplayConfig};
use crate::display::{render_local_time, render_optional_time};
use colored::*;
use serde_json::json;

/// Run the snapshot command
pub async fn run_snapshot(store: &Store, config: &Config, args: &SnapshotArgs) -> Result<()> {
    let rows = {
        let mut session = store.session().await?;
        query::snapshot(&mut session).await?
    };

    let output = match args.format {
        OutputFormat::Human => {
            let mut output = render_human(&rows, &config.display);
            if let Some(hint) = history_hint(&config.display.default_locations) {
                output.push_str("\n\n");
                output.push_str(&hint);
            }
            output
        }
        OutputFormat::Json => render_json(&rows, &config.display)?,
    };
    println!("{}", output);
    Ok(())
}

/// Aligned table, one line per location
pub fn render_human(rows: &[SnapshotRow], display: &DisplayConfig) -> String {
    if rows.is_empty() {
        return "No active locations.".yellow().to_string();
    }

    let width = rows
        .iter()
        .map(|row| row.location.chars().count())
        .max()
        .unwrap_or(0)
        .max("Location".len());

    let mut output = format!(
        "{}\n",
        format!(
            "{:<width$}  {:>10}  {:>10}  {}",
            "Location", "Temp", "Humidity", "Time"
        )
        .bright_green()
        .bold()
    );

    for row in rows {
        output.push_str(&format!(
            "{:<width$}  {:>10}  {:>10}  {}\n",
            row.location.bright_cyan(),
            format_value(row.temp_c, Metric::TempC.unit()),
            format_value(row.humidity_pct, Metric::HumidityPct.unit()),
            render_optional_time(row.timestamp_utc, &display.time_format, &display.timezone)
        ));
    }

    output.trim_end().to_string()
}

/// Suggested history invocation for the configured default locations
///
/// `None` when no usable location is configured.
pub fn history_hint(default_locations: &[String]) -> Option<String> {
    let locations = RangeRequest::from_raw(default_locations, None, None).locations;
    if locations.is_empty() {
        return None;
    }

    let flags: Vec<String> = locations
        .iter()
        .map(|location| format!("-l {}", shell_quote(location)))
        .collect();
    Some(format!(
        "{} hosewebview history {}",
        "History:".bright_green().bold(),
        flags.join(" ")
    ))
}

fn shell_quote(value: &str) -> String {
    let plain = value
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if plain {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', "'\\''"))
    }
}

/// JSON array with UTC timestamps and rendered local times
pub fn render_json(rows: &[SnapshotRow], display: &DisplayConfig) -> Result<String> {
    let entries: Vec<_> = rows
        .iter()
        .map(|row| {
            json!({
                "location": row.location,
                "temp_c": row.temp_c,
                "humidity_pct": row.humidity_pct,
                "timestamp_utc": row.timestamp_utc,
                "localtime": row
                    .timestamp_utc
                    .map(|at| render_local_time(at, &display.time_format, &display.timezone)),
            })
        })
        .collect();

    Ok(serde_json::to_string_pretty(&entries)?)
}
