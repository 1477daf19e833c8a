//! Raw records as read from a source, before normalization.

use serde_json::{Map, Value};
use std::sync::Arc;

/// A JSON object from a structured source.
pub type JsonObject = Map<String, Value>;

/// One source record, tagged with the shape it was read as.
#[derive(Debug, Clone, PartialEq)]
pub enum RawRecord {
    /// Per-variety analysis output (nested `original_data`, `analysis_result`, ...).
    Analysis(JsonObject),
    /// Compiled dashboard record (flat fields plus `research_data`).
    Enhanced(JsonObject),
    /// One CSV data row.
    Tabular(TabularRow),
}

impl RawRecord {
    pub fn kind(&self) -> &'static str {
        match self {
            RawRecord::Analysis(_) => "analysis",
            RawRecord::Enhanced(_) => "enhanced",
            RawRecord::Tabular(_) => "tabular",
        }
    }
}

/// A CSV row addressed by header name.
///
/// All rows of one file share the same header slice. Rows shorter than the
/// header read their missing cells as absent.
#[derive(Debug, Clone, PartialEq)]
pub struct TabularRow {
    headers: Arc<[String]>,
    cells: Vec<String>,
}

impl TabularRow {
    pub fn new(headers: Arc<[String]>, cells: Vec<String>) -> Self {
        Self { headers, cells }
    }

    /// Cell under the first column named `column`.
    pub fn get(&self, column: &str) -> Option<&str> {
        let idx = self.headers.iter().position(|h| h == column)?;
        self.cells.get(idx).map(String::as_str)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }
}
