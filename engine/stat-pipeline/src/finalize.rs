//! Labels, sorts and prunes a scored table to the output schema

use tracing::debug;

use crate::error::Result;
use crate::table::{parse_field, Record, Table, PLAYER_FIELD};

/// Field carrying the season label
pub const YEAR_FIELD: &str = "year";

/// Field carrying the player's position
pub const POSITION_FIELD: &str = "pos";

/// Footer `player` label for a team
pub fn totals_label(team: &str) -> String {
    format!("{team} Totals")
}

/// Prepare a scored table for persistence.
///
/// Every record and the footer get `year`, the footer is relabelled as the
/// team totals, records are ordered by position then standard points
/// (highest first), and the columns are rewritten to exactly `final_headers`.
pub fn finalize<S: AsRef<str>>(
    table: &Table,
    team: &str,
    year: &str,
    final_headers: &[S],
) -> Result<Table> {
    let mut records = table.to_records()?;
    records.add_header(YEAR_FIELD);

    for record in records.records.iter_mut() {
        record.insert(YEAR_FIELD.to_string(), year.to_string());
    }
    records.footer.insert(YEAR_FIELD.to_string(), year.to_string());
    records.footer.insert(PLAYER_FIELD.to_string(), totals_label(team));

    sort_by_position_and_points(&mut records.records)?;

    records.headers = final_headers.iter().map(|h| h.as_ref().to_string()).collect();

    debug!(team, year, players = records.records.len(), "finalized table");
    Ok(records.into_table())
}

/// Stable sort by `pos` ascending, then `std_pts` descending
fn sort_by_position_and_points(records: &mut Vec<Record>) -> Result<()> {
    let mut keyed = records
        .drain(..)
        .map(|record| {
            let points: f64 = parse_field(&record, "std_pts")?;
            Ok((points, record))
        })
        .collect::<Result<Vec<_>>>()?;

    keyed.sort_by(|(a_pts, a), (b_pts, b)| {
        position(a).cmp(position(b)).then_with(|| b_pts.total_cmp(a_pts))
    });
    records.extend(keyed.into_iter().map(|(_, record)| record));
    Ok(())
}

fn position(record: &Record) -> &str {
    record.get(POSITION_FIELD).map(String::as_str).unwrap_or("")
}
