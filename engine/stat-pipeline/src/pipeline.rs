//! Per team/season processing from raw page to finalized table

use tracing::{debug, info};

use crate::advanced::calc_advanced_stats;
use crate::config::PipelineConfig;
use crate::despoof::despoof;
use crate::error::Result;
use crate::extract::TableExtractor;
use crate::fantasy::FantasyCalculator;
use crate::finalize::finalize;
use crate::merge::{merge_tables, MERGED_TABLE};
use crate::sink::TableSink;
use crate::table::Table;

/// Sink destination of a source or merged table
pub fn parsed_destination(team: &str, year: &str, table: &str) -> String {
    format!("parsed_tables/{team}_{year}_{table}")
}

/// Sink destination of the finalized table
pub fn final_destination(team: &str, year: &str) -> String {
    format!("final/{team}_{year}")
}

/// Stateless processor for one team season at a time
pub struct Pipeline {
    config: PipelineConfig,
    extractor: TableExtractor,
    fantasy: FantasyCalculator,
}

impl Pipeline {
    /// Create a pipeline from a configuration
    pub fn new(config: PipelineConfig) -> Result<Self> {
        let extractor = TableExtractor::new(&config)?;
        let fantasy = FantasyCalculator::new(config.scoring.clone());
        Ok(Self { config, extractor, fantasy })
    }

    /// Process one raw team page.
    ///
    /// Source tables, the merged table and the finalized table are written to
    /// `sink` as they are produced. Any failure is reported against the team
    /// and season.
    pub fn run(
        &self,
        html: &str,
        team: &str,
        year: &str,
        sink: &mut dyn TableSink,
    ) -> Result<Table> {
        self.process(html, team, year, sink).map_err(|e| e.for_task(team, year))
    }

    fn process(
        &self,
        html: &str,
        team: &str,
        year: &str,
        sink: &mut dyn TableSink,
    ) -> Result<Table> {
        let tables = self.extractor.extract(&despoof(html));
        for table in &tables {
            sink.write_table(&parsed_destination(team, year, &table.name), table)?;
        }

        let merged = merge_tables(&tables)?;
        sink.write_table(&parsed_destination(team, year, MERGED_TABLE), &merged)?;
        debug!(team, year, players = merged.rows.len(), "merged source tables");

        let advanced = calc_advanced_stats(&merged, &self.config.percent_fields)?;
        let scored = self.fantasy.calculate(&advanced)?;
        let finalized = finalize(&scored, team, year, &self.config.final_headers)?;

        sink.write_table(&final_destination(team, year), &finalized)?;
        info!(team, year, players = finalized.rows.len(), "processed team season");
        Ok(finalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use crate::sink::MemorySink;

    #[test]
    fn test_destinations() {
        assert_eq!(parsed_destination("KC", "2024", "passing"), "parsed_tables/KC_2024_passing");
        assert_eq!(final_destination("KC", "2024"), "final/KC_2024");
    }

    #[test]
    fn test_page_without_tables_fails_on_missing_totals() {
        let mut sink = MemorySink::new();
        let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
        let err = pipeline.run("<html></html>", "KC", "2024", &mut sink).unwrap_err();

        assert!(matches!(
            err,
            PipelineError::Task { ref team, ref season, .. } if team == "KC" && season == "2024"
        ));
        assert_eq!(err.field(), Some("pass_cmp"));
        // source tables and the merge are still written before the failure
        assert_eq!(
            sink.destinations(),
            vec![
                "parsed_tables/KC_2024_passing",
                "parsed_tables/KC_2024_rushing_and_receiving",
                "parsed_tables/KC_2024_merged",
            ]
        );
    }
}
