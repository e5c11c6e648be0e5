//! Command-line argument definitions for the sensor query tool
//!
//! This module defines the CLI interface using the clap derive API. Global
//! options (config file, database, timezone, verbosity) apply to every
//! subcommand and override the layered configuration.

use crate::app::models::Metric;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the home sensor network query tool
///
/// Reads station assignments and sensor readings from the shared SQLite
/// store and reports them by logical location.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "hosewebview",
    version,
    about = "Query the home sensor network by location",
    long_about = "Reads the sensor network's SQLite store and answers two questions: what is the \
                  current temperature and humidity at every active location, and how did a set of \
                  locations evolve over a time window. Readings are attributed to the location their \
                  station served at the time they were taken."
)]
pub struct Args {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Options shared by every subcommand
#[derive(Debug, Clone, Default, clap::Args)]
pub struct GlobalArgs {
    /// Configuration file (TOML)
    ///
    /// If not specified, $HOSEWEBVIEW_CONFIG, ./hosewebview.toml and the user
    /// config directory are tried in that order.
    #[arg(short = 'c', long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// SQLite database written by the ingestion pipeline
    #[arg(long = "database", value_name = "PATH", global = true)]
    pub database: Option<PathBuf>,

    /// IANA timezone for rendered times (e.g., Europe/Berlin)
    #[arg(long = "timezone", value_name = "TZ", global = true)]
    pub timezone: Option<String>,

    /// Bound on any single storage call, in seconds
    #[arg(long = "timeout", value_name = "SECS", global = true)]
    pub timeout_secs: Option<u64>,

    /// Enable verbose logging output
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Enable verbose logging (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Current temperature and humidity for every active location
    Snapshot(SnapshotArgs),
    /// Location-labeled readings over a time window
    History(HistoryArgs),
}

/// Output format for query results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned table with local times
    #[default]
    Human,
    /// Pretty-printed JSON with UTC timestamps
    Json,
}

/// Arguments for the snapshot command
#[derive(Debug, Clone, Default, clap::Args)]
pub struct SnapshotArgs {
    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the history command
#[derive(Debug, Clone, Default, clap::Args)]
pub struct HistoryArgs {
    /// Location to include; repeat for several. Defaults to every current location
    #[arg(short = 'l', long = "location", value_name = "NAME")]
    pub locations: Vec<String>,

    /// Start of the window (ISO-8601). Defaults to midnight UTC yesterday
    #[arg(long = "start", value_name = "TIME")]
    pub start: Option<String>,

    /// End of the window (ISO-8601). Defaults to now
    #[arg(long = "end", value_name = "TIME")]
    pub end: Option<String>,

    /// Only show one metric (temp_c, humidity_pct or pressure_hpa)
    #[arg(long = "metric", value_name = "METRIC")]
    pub metric: Option<Metric>,

    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

impl GlobalArgs {
    /// Log level requested on the command line, if any
    ///
    /// Without `-q` or `-v` the configured level applies.
    pub fn get_log_level(&self) -> Option<&'static str> {
        if self.quiet {
            Some("error")
        } else {
            match self.verbose {
                0 => None,
                1 => Some("info"),
                2 => Some("debug"),
                _ => Some("trace"),
            }
        }
    }
}

impl HistoryArgs {
    /// Metrics to print, in display order
    pub fn metrics(&self) -> Vec<Metric> {
        match self.metric {
            Some(metric) => vec![metric],
            None => vec![Metric::TempC, Metric::HumidityPct, Metric::PressureHpa],
        }
    }
}
