//! Share-of-team percentages for counting stats

use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::table::{parse_field, parse_total, Table};

/// Header of the percentage column for `field`
pub fn percent_header(field: &str) -> String {
    format!("{field}%")
}

/// Format a player's share of the team total as e.g. `12.34%`
pub fn format_percent(player_value: f64, team_total: f64) -> String {
    format!("{:.2}%", player_value / team_total * 100.0)
}

/// Append a `<field>%` column for every field in `fields`.
///
/// The team total comes from the footer. A value that does not parse, or a
/// zero team total, fails the whole table.
pub fn calc_advanced_stats<S: AsRef<str>>(table: &Table, fields: &[S]) -> Result<Table> {
    let mut records = table.to_records()?;

    let mut totals = Vec::with_capacity(fields.len());
    for field in fields {
        let field = field.as_ref();
        let total: f64 = parse_total(&records.footer, field)?;
        if total == 0.0 {
            return Err(PipelineError::ZeroTeamTotal { field: field.to_string() });
        }
        records.add_header(&percent_header(field));
        totals.push((field, total));
    }

    for record in records.records.iter_mut() {
        for (field, total) in &totals {
            let value: f64 = parse_field(record, field)?;
            record.insert(percent_header(field), format_percent(value, *total));
        }
    }

    debug!(table = %records.name, players = records.records.len(), fields = totals.len(), "advanced stats");
    Ok(records.into_table())
}
