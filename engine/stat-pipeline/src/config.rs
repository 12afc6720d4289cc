//! Reference data and configuration for the stat pipeline

use serde::{Deserialize, Serialize};

/// Table ids extracted from every team page, in merge order
pub const TABLE_IDS: &[&str] = &["passing", "rushing_and_receiving"];

/// `data-stat` keys renamed so both source tables share one vocabulary
pub const HEADER_RENAMES: &[(&str, &str)] = &[
    ("name_display", "player"),
    ("games", "g"),
    ("games_started", "gs"),
    ("pass_sacked", "times sacked"),
];

/// Counting stats that get a `<field>%` share-of-team column
pub const PERCENT_FIELDS: &[&str] = &[
    "pass_cmp",
    "pass_att",
    "pass_yds",
    "pass_td",
    "pass_int",
    "pass_1d",
    "times sacked",
    "pass_sacked_yds",
    "rush_att",
    "rush_yds",
    "rush_td",
    "targets",
    "rec",
    "rec_yds",
    "rec_td",
    "touches",
    "fumbles",
];

/// Fields appended by the fantasy calculator
pub const FANTASY_FIELDS: &[&str] =
    &["std_pts", "half_ppr_pts", "ppr_pts", "std_ppg", "half_ppr_ppg", "ppr_ppg", "order"];

/// Output schema of the finalized table
pub const FINAL_HEADERS: &[&str] = &[
    "year",
    "order",
    "projection",
    "player",
    "age",
    "pos",
    "g",
    "gs",
    "rush_att",
    "rush_yds",
    "rush_td",
    "rush_1d",
    "targets",
    "rec",
    "rec_yds",
    "rec_td",
    "rec_1d",
    "touches",
    "fumbles",
    "pass_cmp",
    "pass_att",
    "pass_yds",
    "pass_td",
    "pass_int",
    "pass_1d",
    "times sacked",
    "pass_sacked_yds",
    "pass_long",
    "rush_long",
    "rec_long",
    "pass_cmp%",
    "pass_att%",
    "pass_yds%",
    "pass_td%",
    "pass_int%",
    "pass_1d%",
    "times sacked%",
    "pass_sacked_yds%",
    "rush_att%",
    "rush_yds%",
    "rush_td%",
    "rush_1d%",
    "targets%",
    "rec%",
    "rec_yds%",
    "rec_td%",
    "rec_1d%",
    "touches%",
    "fumbles%",
    "std_pts",
    "half_ppr_pts",
    "ppr_pts",
    "std_ppg",
    "half_ppr_ppg",
    "ppr_ppg",
    "pos_rank",
];

/// Headers whose missing values are written as an empty string instead of "0"
pub const BLANK_DEFAULT_HEADERS: &[&str] = &["projection", "pos_rank"];

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Which points total `ppr_ppg` is divided from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PprPpgBasis {
    /// `half_ppr_pts / g`, the figure the published CSVs have always carried
    HalfPpr,
    /// `ppr_pts / g`
    FullPpr,
}

/// Fantasy scoring weights
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Points per rushing yard
    pub rush_yds: f64,
    /// Points per rushing touchdown
    pub rush_td: f64,
    /// Points per receiving yard
    pub rec_yds: f64,
    /// Points per receiving touchdown
    pub rec_td: f64,
    /// Points per fumble
    pub fumble: f64,
    /// Points per passing yard
    pub pass_yds: f64,
    /// Points per passing touchdown
    pub pass_td: f64,
    /// Points per interception thrown
    pub pass_int: f64,
    /// Points per reception in half-PPR scoring
    pub half_ppr_rec: f64,
    /// Points per reception in full-PPR scoring
    pub ppr_rec: f64,
    /// Basis for the `ppr_ppg` column
    pub ppr_ppg_basis: PprPpgBasis,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            rush_yds: 0.1,
            rush_td: 6.0,
            rec_yds: 0.1,
            rec_td: 6.0,
            fumble: -1.0,
            pass_yds: 0.04,
            pass_td: 4.0,
            pass_int: -2.0,
            half_ppr_rec: 0.5,
            ppr_rec: 1.0,
            ppr_ppg_basis: PprPpgBasis::HalfPpr,
        }
    }
}

/// Configuration for one pipeline instance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Table ids to extract, in merge order
    pub table_ids: Vec<String>,

    /// `(source key, canonical key)` header renames
    pub header_renames: Vec<(String, String)>,

    /// Fields that get a share-of-team percentage column
    pub percent_fields: Vec<String>,

    /// Output schema of the finalized table
    pub final_headers: Vec<String>,

    /// Fantasy scoring weights
    pub scoring: ScoringConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            table_ids: owned(TABLE_IDS),
            header_renames: HEADER_RENAMES
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
            percent_fields: owned(PERCENT_FIELDS),
            final_headers: owned(FINAL_HEADERS),
            scoring: ScoringConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.table_ids.is_empty() {
            return Err("table_ids must not be empty".to_string());
        }

        if self.final_headers.is_empty() {
            return Err("final_headers must not be empty".to_string());
        }

        for (i, header) in self.final_headers.iter().enumerate() {
            if self.final_headers[..i].contains(header) {
                return Err(format!("final_headers lists '{header}' twice"));
            }
        }

        Ok(())
    }
}
