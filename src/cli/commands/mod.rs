//! Command implementations for the sensor query CLI
//!
//! Each command lives in its own module and shares configuration loading,
//! logging setup and store access through [`shared`].

pub mod history;
pub mod shared;
pub mod snapshot;

use crate::Result;
use crate::app::storage::Store;
use crate::cli::args::{Args, Commands};
use tracing::info;

/// Main command runner
///
/// Loads configuration, installs logging, opens the store and dispatches to
/// the subcommand. The store is closed on every exit path.
pub async fn run(args: Args) -> Result<()> {
    let Some(command) = args.command else {
        return Ok(());
    };

    let (config, source) = shared::load_configuration(&args.global)?;
    shared::setup_logging(&args.global, &config)?;
    info!("Configuration: {}", source);

    let store = Store::open(&config.database).await?;
    let result = match command {
        Commands::Snapshot(snapshot_args) => {
            snapshot::run_snapshot(&store, &config, &snapshot_args).await
        }
        Commands::History(history_args) => {
            history::run_history(&store, &config, &history_args).await
        }
    };
    store.close().await;

    result
}
