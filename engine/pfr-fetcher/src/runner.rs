//! Batch orchestration over teams and seasons

use std::fs;
use std::time::Duration;

use anyhow::{Context, Result};
use rand::Rng;
use stat_pipeline::{CsvDirSink, Pipeline};
use tracing::{error, info, warn};

use crate::client::PageSource;
use crate::config::FetcherConfig;
use crate::error::FetchError;
use crate::teams::Team;

/// What happened to one team season
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    /// Fetched and processed; carries the number of players written
    Processed { players: usize },
    /// A cached page exists and no re-fetch was forced
    Skipped,
    /// Fetching or processing failed
    Failed { reason: String },
    /// Not tried because the site rate limited an earlier task
    NotAttempted,
}

/// Outcome of one team season
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskReport {
    pub team: String,
    pub year: u16,
    pub outcome: TaskOutcome,
}

/// Outcomes of a whole run, in task order
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub reports: Vec<TaskReport>,
}

impl RunSummary {
    /// Number of processed tasks
    pub fn processed(&self) -> usize {
        self.count(|o| matches!(o, TaskOutcome::Processed { .. }))
    }

    /// Number of skipped tasks
    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, TaskOutcome::Skipped))
    }

    /// Number of failed tasks
    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, TaskOutcome::Failed { .. }))
    }

    /// Number of tasks left untried after a rate limit
    pub fn not_attempted(&self) -> usize {
        self.count(|o| matches!(o, TaskOutcome::NotAttempted))
    }

    fn count(&self, predicate: impl Fn(&TaskOutcome) -> bool) -> usize {
        self.reports.iter().filter(|r| predicate(&r.outcome)).count()
    }
}

/// Fetches, caches and processes team seasons one after another
pub struct Runner<S: PageSource> {
    config: FetcherConfig,
    source: S,
    pipeline: Pipeline,
}

impl<S: PageSource> Runner<S> {
    /// Create a new runner
    pub fn new(config: FetcherConfig, source: S) -> Result<Self> {
        let pipeline =
            Pipeline::new(config.pipeline.clone()).context("Failed to build stat pipeline")?;
        Ok(Self { config, source, pipeline })
    }

    /// Create the page cache and table output directories
    pub fn prepare_output_dirs(&self) -> Result<()> {
        for dir in ["fetched_pages", "parsed_tables", "final"] {
            let path = self.config.output_dir.join(dir);
            fs::create_dir_all(&path)
                .with_context(|| format!("Failed to create output directory: {}", path.display()))?;
        }
        Ok(())
    }

    /// Run every year × team task in order.
    ///
    /// A failed task is logged and reported; the batch carries on. A rate
    /// limit stops the batch and leaves the remaining tasks untried.
    pub async fn run(&self, teams: &[Team], years: &[u16], force: bool) -> Result<RunSummary> {
        self.prepare_output_dirs()?;

        let total = teams.len() * years.len();
        let mut summary = RunSummary::default();
        let mut completed = 0;
        let mut rate_limited = false;

        for &year in years {
            for team in teams {
                if rate_limited {
                    summary.reports.push(report(team, year, TaskOutcome::NotAttempted));
                    continue;
                }
                completed += 1;

                let page_path = self.config.page_path(team.code, year);
                if page_path.exists() && !force {
                    info!(
                        team = team.code,
                        year,
                        completed,
                        total,
                        "page already fetched, skipping"
                    );
                    summary.reports.push(report(team, year, TaskOutcome::Skipped));
                    continue;
                }

                let outcome = match self.process(team, year).await {
                    Ok(players) => {
                        info!(team = team.code, year, completed, total, players, "task complete");
                        TaskOutcome::Processed { players }
                    }
                    Err(e) => {
                        error!(team = team.code, year, completed, total, "task failed: {e:#}");
                        rate_limited = e
                            .downcast_ref::<FetchError>()
                            .is_some_and(FetchError::is_rate_limited);
                        TaskOutcome::Failed { reason: format!("{e:#}") }
                    }
                };
                summary.reports.push(report(team, year, outcome));

                if rate_limited {
                    warn!(remaining = total - completed, "rate limit hit, stopping batch");
                } else if completed < total {
                    tokio::time::sleep(self.next_delay()).await;
                }
            }
        }

        info!(
            processed = summary.processed(),
            skipped = summary.skipped(),
            failed = summary.failed(),
            not_attempted = summary.not_attempted(),
            "run complete"
        );
        Ok(summary)
    }

    async fn process(&self, team: &Team, year: u16) -> Result<usize> {
        let html = self.source.fetch_page(team, year).await?;

        let mut sink = CsvDirSink::new(&self.config.output_dir);
        let table = self.pipeline.run(&html, team.code, &year.to_string(), &mut sink)?;

        // a cached page always has its final table
        let page_path = self.config.page_path(team.code, year);
        fs::write(&page_path, &html)
            .with_context(|| format!("Failed to write page: {}", page_path.display()))?;
        Ok(table.rows.len())
    }

    fn next_delay(&self) -> Duration {
        let (min, max) = (self.config.min_delay_ms, self.config.max_delay_ms);
        let ms = if max > min { rand::thread_rng().gen_range(min..max) } else { min };
        Duration::from_millis(ms)
    }
}

fn report(team: &Team, year: u16, outcome: TaskOutcome) -> TaskReport {
    TaskReport { team: team.code.to_string(), year, outcome }
}
