//! fffetch: Pro Football Reference team stats to CSV

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::info;

use pfr_fetcher::cli::{handle_fetch, print_summary};
use pfr_fetcher::{initialize_logging, Cli, Commands, FetcherConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config =
        FetcherConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    cli.apply_overrides(&mut config);

    config.validate().map_err(|e| anyhow!("Invalid configuration: {e}"))?;

    // Initialize logging
    initialize_logging(&config.log_level)?;

    info!("Starting fffetch v{}", env!("CARGO_PKG_VERSION"));
    info!(output_dir = %config.output_dir.display(), "configuration loaded");

    match &cli.command {
        Commands::Fetch(args) => {
            let summary = handle_fetch(config, args).await?;
            print_summary(&summary);
        }
    }

    Ok(())
}
