//! Output sinks for intermediate and finalized tables

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::error::Result;
use crate::table::Table;

/// Destination of every table the pipeline produces
pub trait TableSink {
    /// Persist `table` under the relative `destination` identifier
    fn write_table(&mut self, destination: &str, table: &Table) -> Result<()>;
}

/// Writes each table as `<root>/<destination>.csv`
#[derive(Debug, Clone)]
pub struct CsvDirSink {
    root: PathBuf,
}

impl CsvDirSink {
    /// Create a sink rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// File a destination is written to
    pub fn path_for(&self, destination: &str) -> PathBuf {
        self.root.join(format!("{destination}.csv"))
    }
}

impl TableSink for CsvDirSink {
    fn write_table(&mut self, destination: &str, table: &Table) -> Result<()> {
        let path = self.path_for(destination);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut writer = csv::WriterBuilder::new().flexible(true).from_path(&path)?;
        if !table.headers.is_empty() {
            writer.write_record(&table.headers)?;
            for row in &table.rows {
                writer.write_record(row)?;
            }
            if table.has_footer() {
                writer.write_record(&table.footer)?;
            }
        }
        writer.flush()?;

        debug!(path = %path.display(), rows = table.rows.len(), "wrote table");
        Ok(())
    }
}

/// Keeps every written table in call order
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    /// `(destination, table)` pairs
    pub tables: Vec<(String, Table)>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Written destinations in order
    pub fn destinations(&self) -> Vec<&str> {
        self.tables.iter().map(|(destination, _)| destination.as_str()).collect()
    }

    /// Last table written to `destination`
    pub fn get(&self, destination: &str) -> Option<&Table> {
        self.tables.iter().rev().find(|(d, _)| d == destination).map(|(_, table)| table)
    }
}

impl TableSink for MemorySink {
    fn write_table(&mut self, destination: &str, table: &Table) -> Result<()> {
        self.tables.push((destination.to_string(), table.clone()));
        Ok(())
    }
}
