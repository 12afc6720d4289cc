//! Positional tables and their keyed record view

use std::collections::HashMap;
use std::str::FromStr;

use crate::config::BLANK_DEFAULT_HEADERS;
use crate::error::{PipelineError, Result};

/// One player (or footer) row keyed by header name
pub type Record = HashMap<String, String>;

/// Field that identifies a player across tables
pub const PLAYER_FIELD: &str = "player";

/// A named table: ordered headers, positional rows and an optional footer row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Table name (source table id, `merged`, ...)
    pub name: String,
    /// Ordered column names
    pub headers: Vec<String>,
    /// Data rows aligned to `headers`
    pub rows: Vec<Vec<String>>,
    /// Team aggregate row aligned to `headers`; empty when the table has none
    pub footer: Vec<String>,
}

impl Table {
    /// Create an empty table
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Default::default() }
    }

    /// True when the table carries no columns and no rows
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.rows.is_empty()
    }

    /// True when a footer row is present
    pub fn has_footer(&self) -> bool {
        !self.footer.is_empty()
    }

    /// Position of `header`, if the table has it
    pub fn column(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    /// Cell of data row `row` under `header`
    pub fn cell(&self, row: usize, header: &str) -> Option<&str> {
        let col = self.column(header)?;
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    /// Footer cell under `header`
    pub fn footer_cell(&self, header: &str) -> Option<&str> {
        let col = self.column(header)?;
        self.footer.get(col).map(String::as_str)
    }

    /// Reinterpret rows as keyed records.
    ///
    /// Every data row, and the footer when present, must have exactly one
    /// cell per header.
    pub fn to_records(&self) -> Result<RecordSet> {
        let expected = self.headers.len();
        let mut records = Vec::with_capacity(self.rows.len());

        for (index, row) in self.rows.iter().enumerate() {
            if row.len() != expected {
                return Err(PipelineError::SchemaMisalignment {
                    table: self.name.clone(),
                    row: index,
                    expected,
                    found: row.len(),
                });
            }
            records.push(zip_record(&self.headers, row));
        }

        let footer = if self.footer.is_empty() {
            Record::new()
        } else if self.footer.len() != expected {
            return Err(PipelineError::SchemaMisalignment {
                table: self.name.clone(),
                row: self.rows.len(),
                expected,
                found: self.footer.len(),
            });
        } else {
            zip_record(&self.headers, &self.footer)
        };

        Ok(RecordSet { name: self.name.clone(), headers: self.headers.clone(), records, footer })
    }
}

fn zip_record(headers: &[String], cells: &[String]) -> Record {
    headers.iter().cloned().zip(cells.iter().cloned()).collect()
}

/// Value written for a header a record has no (or an empty) value for
pub fn default_value(header: &str) -> &'static str {
    if BLANK_DEFAULT_HEADERS.contains(&header) {
        ""
    } else {
        "0"
    }
}

/// Keyed view of a table used by the merge and calculation steps
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    /// Table name
    pub name: String,
    /// Ordered column names
    pub headers: Vec<String>,
    /// Player records in row order
    pub records: Vec<Record>,
    /// Team aggregate record
    pub footer: Record,
}

impl RecordSet {
    /// Create an empty record set
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Default::default() }
    }

    /// Append `header` unless it is already present; returns whether it was added
    pub fn add_header(&mut self, header: &str) -> bool {
        if self.headers.iter().any(|h| h == header) {
            return false;
        }
        self.headers.push(header.to_string());
        true
    }

    /// Materialise back into a positional table.
    ///
    /// Missing or empty record values fall back to [`default_value`]; missing
    /// footer values are left empty.
    pub fn into_table(self) -> Table {
        let rows = self
            .records
            .iter()
            .map(|record| {
                self.headers
                    .iter()
                    .map(|header| match record.get(header) {
                        Some(value) if !value.is_empty() => value.clone(),
                        _ => default_value(header).to_string(),
                    })
                    .collect()
            })
            .collect();

        let footer = self
            .headers
            .iter()
            .map(|header| self.footer.get(header).cloned().unwrap_or_default())
            .collect();

        Table { name: self.name, headers: self.headers, rows, footer }
    }
}

/// Parse `field` of `record`, failing with a [`PipelineError::NumericParse`]
pub(crate) fn parse_field<T: FromStr>(record: &Record, field: &str) -> Result<T> {
    let value = record.get(field).map(String::as_str).unwrap_or("");
    value.parse::<T>().map_err(|_| PipelineError::numeric(field, value, player_of(record)))
}

/// Parse a team total from the footer record
pub(crate) fn parse_total<T: FromStr>(footer: &Record, field: &str) -> Result<T> {
    let value = footer.get(field).map(String::as_str).unwrap_or("");
    value.parse::<T>().map_err(|_| PipelineError::TeamTotalParse {
        field: field.to_string(),
        value: value.to_string(),
    })
}

/// Player name of a record, empty when unset
pub(crate) fn player_of(record: &Record) -> &str {
    record.get(PLAYER_FIELD).map(String::as_str).unwrap_or("")
}
