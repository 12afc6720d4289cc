//! Merges per-source stat tables into one record per player

use std::collections::HashMap;

use crate::error::Result;
use crate::table::{player_of, RecordSet, Table};

/// Name given to the merged table
pub const MERGED_TABLE: &str = "merged";

/// Merge source tables into a single table keyed by player.
///
/// Headers are unioned in first-seen order and players keep the order they
/// first appear in. When two tables carry the same field for a player, or the
/// same footer field, the later table wins.
pub fn merge_tables(tables: &[Table]) -> Result<Table> {
    match tables {
        [] => Ok(Table::new(MERGED_TABLE)),
        [only] => Ok(Table { name: MERGED_TABLE.to_string(), ..only.clone() }),
        _ => {
            let mut merged = RecordSet::new(MERGED_TABLE);
            let mut index_by_player: HashMap<String, usize> = HashMap::new();

            for table in tables {
                for header in &table.headers {
                    merged.add_header(header);
                }

                let source = table.to_records()?;
                for record in source.records {
                    let player = player_of(&record).to_string();
                    match index_by_player.get(&player) {
                        Some(&index) => merged.records[index].extend(record),
                        None => {
                            index_by_player.insert(player, merged.records.len());
                            merged.records.push(record);
                        }
                    }
                }

                for header in &table.headers {
                    let value = source.footer.get(header).cloned().unwrap_or_default();
                    merged.footer.insert(header.clone(), value);
                }
            }

            Ok(merged.into_table())
        }
    }
}
