//! Variety catalog source loading.
//!
//! Reads a precompiled catalog file into tagged [`RawRecord`]s, ready for
//! normalization.
//!
//! # Features
//!
//! - **CSV**: header row plus data rows, RFC 4180 quoting via the `csv` crate
//! - **JSON**: an array of analysis results or compiled dashboard records
//! - **Checks**: size limit, UTF-16 rejection, UTF-8 BOM stripping
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use seedscope_ingest::{LoadOptions, load_source};
//!
//! let loaded = load_source(Path::new("data/varieties.json"), LoadOptions::default())?;
//! println!("{} records as {}", loaded.report.records, loaded.report.format);
//! ```

mod error;
mod file;
mod format;
mod json;
mod loader;
mod raw;
mod tabular;

// === Error Types ===
pub use error::{IngestError, Result};

// === Loading ===
pub use file::{DEFAULT_MAX_FILE_SIZE, check_file_size_with_limit, read_text, validate_encoding};
pub use format::SourceFormat;
pub use loader::{LoadOptions, LoadReport, LoadedSource, load_source, parse_source};

// === Raw Records ===
pub use json::{JsonArray, parse_json_array};
pub use raw::{JsonObject, RawRecord, TabularRow};
pub use tabular::parse_tabular;
