use anyhow::Context;
use clap::{CommandFactory, Parser};
use hosewebview::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help
    if args.command.is_none() {
        let _ = Args::command().print_help();
        println!();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result: anyhow::Result<()> = runtime.block_on(async {
        let shutdown_signal = async {
            // A failed handler install must not look like a Ctrl+C
            if tokio::signal::ctrl_c().await.is_err() {
                std::future::pending::<()>().await;
            }
        };

        tokio::select! {
            result = commands::run(args) => result.context("Query failed"),
            _ = shutdown_signal => {
                anyhow::bail!("Interrupted by user")
            }
        }
    });

    if let Err(error) = result {
        eprintln!("Error: {:#}", error);
        process::exit(1);
    }
}
