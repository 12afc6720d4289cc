//! # PFR Fetcher
//!
//! Downloads Pro Football Reference team-season pages, caches them under
//! `fetched_pages/` and runs each through the stat pipeline, writing
//! `parsed_tables/` intermediates and `final/<team>_<year>.csv`.
//!
//! Fetches are sequential with a randomized pause between requests. A team
//! season that fails is reported and the rest of the batch continues.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod runner;
pub mod teams;

pub use cli::{Cli, Commands, FetchArgs};
pub use client::{PageSource, PfrClient};
pub use config::FetcherConfig;
pub use error::FetchError;
pub use logging::initialize_logging;
pub use runner::{RunSummary, Runner, TaskOutcome, TaskReport};
pub use teams::Team;
