//! Error types for the stat pipeline

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors that can occur while turning a stats page into output tables
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A field needed by a calculation is not a valid number
    #[error("Field '{field}' for '{player}' is not numeric: '{value}'")]
    NumericParse { field: String, value: String, player: String },

    /// A team total in the table footer is not a valid number
    #[error("Team total for '{field}' is not numeric: '{value}'")]
    TeamTotalParse { field: String, value: String },

    /// The team total used as a percentage denominator is zero
    #[error("Team total for '{field}' is zero")]
    ZeroTeamTotal { field: String },

    /// A row does not line up with the table headers
    #[error("Table '{table}' row {row} has {found} cells, expected {expected}")]
    SchemaMisalignment { table: String, row: usize, expected: usize, found: usize },

    /// A CSS selector used for extraction is invalid
    #[error("Invalid selector '{selector}': {reason}")]
    Selector { selector: String, reason: String },

    /// I/O errors from an output sink
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV writer errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Failure of one team/season task
    #[error("Processing {team} {season} failed")]
    Task {
        team: String,
        season: String,
        #[source]
        source: Box<PipelineError>,
    },
}

impl PipelineError {
    /// Create a numeric parse error for a player field
    pub fn numeric(
        field: impl Into<String>,
        value: impl Into<String>,
        player: impl Into<String>,
    ) -> Self {
        Self::NumericParse { field: field.into(), value: value.into(), player: player.into() }
    }

    /// Wrap an error with the team and season it happened in
    pub fn for_task(self, team: impl Into<String>, season: impl Into<String>) -> Self {
        Self::Task { team: team.into(), season: season.into(), source: Box::new(self) }
    }

    /// Name of the field that failed, when the error carries one
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::NumericParse { field, .. }
            | Self::TeamTotalParse { field, .. }
            | Self::ZeroTeamTotal { field } => Some(field),
            Self::Task { source, .. } => source.field(),
            _ => None,
        }
    }
}
