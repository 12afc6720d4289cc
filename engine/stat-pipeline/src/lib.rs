//! # Stat Pipeline
//!
//! Turns Pro Football Reference team-season pages into per-player stat tables
//! with share-of-team percentages and fantasy scoring.
//!
//! ## Stages
//!
//! - **despoof**: strips the comment wrappers that hide most stat tables
//! - **extract**: reads the `passing` and `rushing_and_receiving` tables
//! - **merge**: one record per player across both tables
//! - **advanced**: `<field>%` share of the team total
//! - **fantasy**: standard, half-PPR and PPR points, per-game averages, rank
//! - **finalize**: season label, position ordering, fixed output schema
//!
//! ## Usage
//!
//! ```rust,no_run
//! use stat_pipeline::{CsvDirSink, Pipeline, PipelineConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let html = std::fs::read_to_string("fetched_pages/KC_2024.html")?;
//!     let mut sink = CsvDirSink::new("output");
//!
//!     let pipeline = Pipeline::new(PipelineConfig::default())?;
//!     let table = pipeline.run(&html, "KC", "2024", &mut sink)?;
//!     println!("{} players", table.rows.len());
//!     Ok(())
//! }
//! ```

pub mod advanced;
pub mod config;
pub mod despoof;
pub mod error;
pub mod extract;
pub mod fantasy;
pub mod finalize;
pub mod merge;
pub mod pipeline;
pub mod sink;
pub mod table;

#[cfg(test)]
mod integration_tests;

pub use advanced::calc_advanced_stats;
pub use config::{PipelineConfig, PprPpgBasis, ScoringConfig};
pub use despoof::despoof;
pub use error::{PipelineError, Result};
pub use extract::TableExtractor;
pub use fantasy::FantasyCalculator;
pub use finalize::finalize;
pub use merge::merge_tables;
pub use pipeline::{final_destination, parsed_destination, Pipeline};
pub use sink::{CsvDirSink, MemorySink, TableSink};
pub use table::{RecordSet, Table};
