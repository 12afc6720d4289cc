//! # Command Line Interface
//!
//! `fffetch fetch` downloads team pages and writes the stat tables.

use std::path::PathBuf;

use anyhow::{bail, Result};
use chrono::Datelike;
use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::client::PfrClient;
use crate::config::FetcherConfig;
use crate::runner::{RunSummary, Runner, TaskOutcome};
use crate::teams::select_teams;

/// Pro Football Reference team stats fetcher
#[derive(Parser, Debug)]
#[command(name = "fffetch")]
#[command(about = "Fetch team season stats and write fantasy-ready CSVs")]
#[command(version)]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (overrides config and FFFETCH_LOG_LEVEL)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Output root (overrides config and FFFETCH_OUTPUT_DIR)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch and process team seasons
    Fetch(FetchArgs),
}

#[derive(Args, Debug, Default)]
pub struct FetchArgs {
    /// Team codes, e.g. KC,BUF (default: all teams)
    #[arg(short, long = "team", value_delimiter = ',')]
    pub teams: Vec<String>,

    /// Seasons, e.g. 2023,2024 (default: last year)
    #[arg(short, long = "year", value_delimiter = ',')]
    pub years: Vec<u16>,

    /// Re-fetch pages that are already cached
    #[arg(short, long)]
    pub force: bool,
}

impl Cli {
    /// Apply command line overrides on top of the loaded configuration
    pub fn apply_overrides(&self, config: &mut FetcherConfig) {
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        if let Some(output_dir) = &self.output_dir {
            config.output_dir = output_dir.clone();
        }
    }
}

/// Requested seasons, or the season before `today`'s year when none are given
pub fn resolve_years(requested: &[u16], today: impl Datelike) -> Vec<u16> {
    if requested.is_empty() {
        let last_year = u16::try_from(today.year() - 1).unwrap_or_default();
        vec![last_year]
    } else {
        requested.to_vec()
    }
}

/// Run the `fetch` command against the live site
pub async fn handle_fetch(config: FetcherConfig, args: &FetchArgs) -> Result<RunSummary> {
    let teams = select_teams(&args.teams);
    if teams.is_empty() {
        bail!("No valid teams provided");
    }
    let years = resolve_years(&args.years, chrono::Local::now());

    info!(teams = teams.len(), years = ?years, force = args.force, "starting fetch");

    let client = PfrClient::new(&config)?;
    Runner::new(config, client)?.run(&teams, &years, args.force).await
}

/// Print a one-line-per-task report followed by totals
pub fn print_summary(summary: &RunSummary) {
    for report in &summary.reports {
        let status = match &report.outcome {
            TaskOutcome::Processed { players } => format!("ok ({players} players)"),
            TaskOutcome::Skipped => "skipped (already fetched)".to_string(),
            TaskOutcome::Failed { reason } => format!("failed: {reason}"),
            TaskOutcome::NotAttempted => "not attempted (rate limited)".to_string(),
        };
        println!("{:>4} {} {}", report.team, report.year, status);
    }
    println!(
        "{} processed, {} skipped, {} failed, {} not attempted",
        summary.processed(),
        summary.skipped(),
        summary.failed(),
        summary.not_attempted()
    );
}
