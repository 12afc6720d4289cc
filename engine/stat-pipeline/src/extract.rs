//! Stat table extraction from despoofed team pages

use std::collections::HashSet;
use std::ops::Deref;

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use crate::table::Table;

/// `data-stat` key of the decorative row-number column
const RANKER_KEY: &str = "ranker";

/// Class marker of header rows repeated inside a table body
const REPEATED_HEADER_CLASS: &str = "thead";

/// Extracts the configured stat tables from a page
pub struct TableExtractor {
    table_ids: Vec<String>,
    renames: Vec<(String, String)>,
    selectors: Selectors,
}

struct Selectors {
    any_id: Selector,
    header_cell: Selector,
    body_row: Selector,
    repeated_header_row: Selector,
    data_cell: Selector,
    footer_cell: Selector,
}

impl Selectors {
    fn new() -> Result<Self> {
        Ok(Self {
            any_id: selector("[id]")?,
            header_cell: selector("th")?,
            body_row: selector("tbody > tr")?,
            repeated_header_row: selector("tbody > tr.thead")?,
            data_cell: selector("td")?,
            footer_cell: selector("tfoot td")?,
        })
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| PipelineError::Selector {
        selector: css.to_string(),
        reason: e.to_string(),
    })
}

impl TableExtractor {
    /// Create an extractor for the table ids and header renames in `config`
    pub fn new(config: &PipelineConfig) -> Result<Self> {
        Ok(Self {
            table_ids: config.table_ids.clone(),
            renames: config.header_renames.clone(),
            selectors: Selectors::new()?,
        })
    }

    /// Extract one table per configured id, in configured order.
    ///
    /// Ids missing from the page yield empty tables.
    pub fn extract(&self, html: &str) -> Vec<Table> {
        let document = Html::parse_document(html);
        self.table_ids.iter().map(|id| self.extract_table(&document, id)).collect()
    }

    fn extract_table(&self, document: &Html, table_id: &str) -> Table {
        let mut table = Table::new(table_id);

        let Some(element) = document
            .select(&self.selectors.any_id)
            .find(|e| e.value().attr("id") == Some(table_id))
        else {
            debug!(table = table_id, "table not found in page");
            return table;
        };

        table.headers = self.read_headers(&element);
        table.rows = self.read_rows(&element);
        table.footer = element.select(&self.selectors.footer_cell).map(cell_text).collect();

        debug!(
            table = table_id,
            headers = table.headers.len(),
            rows = table.rows.len(),
            footer = table.footer.len(),
            "extracted table"
        );
        table
    }

    fn read_headers(&self, table: &ElementRef) -> Vec<String> {
        let repeated: HashSet<_> = table
            .select(&self.selectors.repeated_header_row)
            .flat_map(|row| row.select(&self.selectors.header_cell))
            .map(|cell| cell.deref().id())
            .collect();

        table
            .select(&self.selectors.header_cell)
            .filter(|cell| !repeated.contains(&cell.deref().id()))
            .filter_map(|cell| cell.value().attr("data-stat"))
            .filter(|key| *key != RANKER_KEY && !key.contains("header"))
            .map(|key| self.rename(key))
            .collect()
    }

    fn read_rows(&self, table: &ElementRef) -> Vec<Vec<String>> {
        table
            .select(&self.selectors.body_row)
            .filter(|row| !is_repeated_header(row))
            .map(|row| row.select(&self.selectors.data_cell).map(cell_text).collect::<Vec<_>>())
            .filter(|cells| !cells.is_empty())
            .collect()
    }

    fn rename(&self, key: &str) -> String {
        self.renames
            .iter()
            .find(|(from, _)| from == key)
            .map(|(_, to)| to.clone())
            .unwrap_or_else(|| key.to_string())
    }
}

fn is_repeated_header(row: &ElementRef) -> bool {
    row.value().attr("class").is_some_and(|class| class.contains(REPEATED_HEADER_CLASS))
}

fn cell_text(cell: ElementRef) -> String {
    cell.text().collect()
}
