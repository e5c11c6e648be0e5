//! Shared components for CLI commands

use crate::cli::args::GlobalArgs;
use crate::config::{Config, ConfigSource};
use crate::{Error, Result};
use tracing::debug;

/// Load layered configuration and apply command-line overrides
///
/// Command-line flags win over environment variables, which win over the
/// config file, which wins over built-in defaults.
pub fn load_configuration(global: &GlobalArgs) -> Result<(Config, ConfigSource)> {
    let (config, source) = Config::load_layered(global.config.as_deref())?;
    let config = apply_cli_overrides(config, global);
    config.validate()?;
    Ok((config, source))
}

/// Apply the global flags on top of a loaded configuration
pub fn apply_cli_overrides(mut config: Config, global: &GlobalArgs) -> Config {
    if let Some(path) = &global.database {
        config = config.with_database_path(path.clone());
    }
    if let Some(timezone) = &global.timezone {
        config = config.with_timezone(timezone.clone());
    }
    if let Some(seconds) = global.timeout_secs {
        config = config.with_query_timeout_secs(seconds);
    }
    if let Some(level) = global.get_log_level() {
        config.logging.level = level.to_string();
    }
    config
}

/// Set up structured logging on stderr
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn setup_logging(global: &GlobalArgs, config: &Config) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = config.logging.level.as_str();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("hosewebview={}", log_level)));

    let result = if global.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };
    result.map_err(|e| Error::configuration(format!("Failed to initialize logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Format an optional value with its unit, or a dash
pub fn format_value(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(value) => format!("{:.1} {}", value, unit),
        None => "-".to_string(),
    }
}
