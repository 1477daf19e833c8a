//! Source loading entry points.

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::error::{IngestError, Result};
use crate::file::{DEFAULT_MAX_FILE_SIZE, check_file_size_with_limit, read_text, validate_encoding};
use crate::format::SourceFormat;
use crate::json::parse_json_array;
use crate::raw::RawRecord;
use crate::tabular::parse_tabular;

/// Options for [`load_source`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    pub format: SourceFormat,
    /// Files above this many bytes are rejected.
    pub max_file_size: u64,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            format: SourceFormat::Auto,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

/// What a load produced besides the records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub path: PathBuf,
    /// The format actually used (never `Auto`).
    pub format: SourceFormat,
    pub records: usize,
    /// Array elements that were not objects.
    pub skipped: usize,
}

/// Raw records of one source plus the load report.
#[derive(Debug, Clone)]
pub struct LoadedSource {
    pub records: Vec<RawRecord>,
    pub report: LoadReport,
}

/// Read a source file into raw records.
///
/// Checks size and encoding first, then parses according to
/// `options.format`. Any failure rejects the whole file.
pub fn load_source(path: &Path, options: LoadOptions) -> Result<LoadedSource> {
    let started = Instant::now();
    let size = check_file_size_with_limit(path, options.max_file_size)?;
    validate_encoding(path)?;
    let text = read_text(path)?;

    let loaded = parse_source(&text, options.format, path)?;

    tracing::info!(
        path = %path.display(),
        format = %loaded.report.format,
        bytes = size,
        records = loaded.report.records,
        skipped = loaded.report.skipped,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "loaded source"
    );

    Ok(loaded)
}

/// Parse already-read source text. `origin` names the source in errors and
/// drives extension-based detection for [`SourceFormat::Auto`].
pub fn parse_source(text: &str, format: SourceFormat, origin: &Path) -> Result<LoadedSource> {
    let resolved = match format {
        SourceFormat::Auto => {
            SourceFormat::from_extension(origin).ok_or_else(|| IngestError::UnknownFormat {
                path: origin.to_path_buf(),
            })?
        }
        explicit => explicit,
    };

    let (records, resolved, skipped) = if resolved.is_json() {
        let array = parse_json_array(text, origin)?;
        // Auto picks the JSON shape from the first object; explicit tags win.
        let resolved = match array.objects.first() {
            Some(first) if format == SourceFormat::Auto => SourceFormat::for_json_object(first),
            _ => resolved,
        };
        let records: Vec<RawRecord> = array
            .objects
            .into_iter()
            .map(|object| {
                if resolved == SourceFormat::EnhancedJson {
                    RawRecord::Enhanced(object)
                } else {
                    RawRecord::Analysis(object)
                }
            })
            .collect();
        (records, resolved, array.skipped)
    } else {
        let rows = parse_tabular(text, origin)?;
        let records: Vec<RawRecord> = rows.into_iter().map(RawRecord::Tabular).collect();
        (records, SourceFormat::Csv, 0)
    };

    Ok(LoadedSource {
        report: LoadReport {
            path: origin.to_path_buf(),
            format: resolved,
            records: records.len(),
            skipped,
        },
        records,
    })
}
