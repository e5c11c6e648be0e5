//! History command: location-labeled series over a time window

use super::shared::format_value;
use crate::Result;
use crate::app::models::Metric;
use crate::app::services::query::{self, RangeRequest, RangeSeries};
use crate::app::storage::Store;
use crate::cli::args::{HistoryArgs, OutputFormat};
use crate::config::{Config, DisplayConfig};
use crate::constants::WINDOW_TIME_FORMAT;
use crate::display::render_local_time;
use chrono::Utc;
use colored::*;
use serde_json::json;

/// Run the history command
pub async fn run_history(store: &Store, config: &Config, args: &HistoryArgs) -> Result<()> {
    let request = RangeRequest::from_raw(&args.locations, args.start.as_deref(), args.end.as_deref());

    let series = {
        let mut session = store.session().await?;
        query::range_series(&mut session, &request, Utc::now()).await?
    };

    let metrics = args.metrics();
    let output = match args.format {
        OutputFormat::Human => render_human(&series, &metrics, &config.display),
        OutputFormat::Json => render_json(&series, &metrics)?,
    };
    println!("{}", output);
    Ok(())
}

/// Window header followed by one block per location and metric
pub fn render_human(series: &RangeSeries, metrics: &[Metric], display: &DisplayConfig) -> String {
    let mut output = format!(
        "{} {} .. {} ({})\n",
        "History".bright_green().bold(),
        render_local_time(series.start, WINDOW_TIME_FORMAT, &display.timezone),
        render_local_time(series.end, WINDOW_TIME_FORMAT, &display.timezone),
        series.locations.join(", ")
    );

    if series.locations.is_empty() {
        output.push_str(&"No locations to show.".yellow().to_string());
        return output;
    }

    for &metric in metrics {
        for location_series in series.series(metric) {
            output.push_str(&format!(
                "\n{} {} ({} points)\n",
                location_series.location.bright_cyan().bold(),
                metric,
                location_series.len()
            ));
            for (at, value) in &location_series.points {
                output.push_str(&format!(
                    "  {}  {:>10}\n",
                    render_local_time(*at, WINDOW_TIME_FORMAT, &display.timezone),
                    format_value(Some(*value), metric.unit())
                ));
            }
        }
    }

    output.trim_end().to_string()
}

/// JSON document echoing the resolved window and the per-location series
pub fn render_json(series: &RangeSeries, metrics: &[Metric]) -> Result<String> {
    let grouped: Vec<_> = metrics
        .iter()
        .flat_map(|&metric| series.series(metric))
        .collect();

    let document = json!({
        "start": series.start,
        "end": series.end,
        "locations": series.locations,
        "series": grouped,
    });

    Ok(serde_json::to_string_pretty(&document)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::{LabeledReading, Reading, SourceKind};
    use chrono::{TimeZone, Utc};

    fn series() -> RangeSeries {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let labeled = |hour: u32, metric: Metric, value: f64| LabeledReading {
            location: "Outside".to_string(),
            reading: Reading {
                station_id: "A".to_string(),
                timestamp_utc: Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap(),
                metric,
                value,
                source_kind: SourceKind::ArchivedWeather,
            },
        };

        RangeSeries {
            start,
            end: Utc.with_ymd_and_hms(2024, 3, 1, 6, 0, 0).unwrap(),
            locations: vec!["Kitchen".to_string(), "Outside".to_string()],
            readings: vec![
                labeled(1, Metric::TempC, 21.5),
                labeled(1, Metric::HumidityPct, 48.0),
                labeled(2, Metric::TempC, 21.0),
            ],
        }
    }

    #[test]
    fn test_human_output_groups_by_location() {
        colored::control::set_override(false);
        let display = DisplayConfig {
            timezone: "UTC".to_string(),
            ..DisplayConfig::default()
        };
        let output = render_human(&series(), &[Metric::TempC], &display);

        assert!(output.starts_with("History 2024-03-01T00:00 .. 2024-03-01T06:00 (Kitchen, Outside)"));
        assert!(output.contains("Kitchen temp_c (0 points)"));
        assert!(output.contains("Outside temp_c (2 points)"));
        assert!(output.contains("  2024-03-01T01:00     21.5 °C"));
        assert!(!output.contains("humidity_pct"));
    }

    #[test]
    fn test_json_output_echoes_window() {
        let output = render_json(&series(), &[Metric::TempC, Metric::HumidityPct]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["start"], "2024-03-01T00:00:00Z");
        assert_eq!(value["locations"][1], "Outside");
        assert_eq!(value["series"].as_array().unwrap().len(), 4);
        assert_eq!(value["series"][1]["metric"], "temp_c");
        assert_eq!(value["series"][1]["points"][0][1], 21.5);
        assert_eq!(value["series"][3]["points"].as_array().unwrap().len(), 1);
    }
}
