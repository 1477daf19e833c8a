//! CSV parsing into header-addressed rows.

use std::path::Path;
use std::sync::Arc;

use csv::{ReaderBuilder, Trim};

use crate::error::{IngestError, Result};
use crate::raw::TabularRow;

/// Parse CSV text with a header row.
///
/// Quoted fields may contain commas, doubled quotes and line breaks. Rows
/// with no non-blank cell are skipped. Header names are trimmed.
pub fn parse_tabular(text: &str, path: &Path) -> Result<Vec<TabularRow>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::None)
        .from_reader(text.as_bytes());

    let mut records = reader.records();
    let headers: Arc<[String]> = match records.next() {
        Some(record) => record
            .map_err(|source| csv_error(path, source))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect(),
        None => {
            return Err(IngestError::EmptySource {
                path: path.to_path_buf(),
            });
        }
    };

    if headers.iter().all(String::is_empty) {
        return Err(IngestError::EmptySource {
            path: path.to_path_buf(),
        });
    }

    let mut rows = Vec::new();
    for record in records {
        let record = record.map_err(|source| csv_error(path, source))?;
        let cells: Vec<String> = record.iter().map(str::to_string).collect();
        if cells.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        rows.push(TabularRow::new(Arc::clone(&headers), cells));
    }

    tracing::debug!(
        path = %path.display(),
        columns = headers.len(),
        rows = rows.len(),
        "parsed CSV source"
    );

    Ok(rows)
}

fn csv_error(path: &Path, source: csv::Error) -> IngestError {
    IngestError::CsvParse {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Vec<TabularRow> {
        parse_tabular(text, Path::new("test.csv")).unwrap()
    }

    #[test]
    fn test_quoted_comma_is_one_field() {
        let rows = parse("variety_name,crop\n\"Basmati, Export Grade\",Rice\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("variety_name"), Some("Basmati, Export Grade"));
        assert_eq!(rows[0].get("crop"), Some("Rice"));
    }

    #[test]
    fn test_doubled_quotes_and_embedded_newline() {
        let rows = parse("variety_name,notes\nPusa 44,\"says \"\"late\"\"\nsecond line\"\nHD 2967,plain\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("notes"), Some("says \"late\"\nsecond line"));
        assert_eq!(rows[1].get("variety_name"), Some("HD 2967"));
    }

    #[test]
    fn test_crlf_and_blank_rows() {
        let rows = parse("crop,variety_name\r\nMaize,HQPM 1\r\n,\r\n\r\nRice,Swarna\r\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].get("variety_name"), Some("Swarna"));
    }

    #[test]
    fn test_short_rows_are_kept() {
        let rows = parse("crop,variety_name,year\nWheat\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("crop"), Some("Wheat"));
        assert_eq!(rows[0].get("year"), None);
    }

    #[test]
    fn test_header_names_trimmed() {
        let rows = parse(" crop , variety_name \nRice,IR64\n");
        assert_eq!(rows[0].get("variety_name"), Some("IR64"));
    }

    #[test]
    fn test_header_only_yields_no_rows() {
        assert!(parse("crop,variety_name\n").is_empty());
    }

    #[test]
    fn test_empty_text_is_an_error() {
        let err = parse_tabular("", Path::new("empty.csv")).unwrap_err();
        assert!(matches!(err, IngestError::EmptySource { .. }));
    }
}
