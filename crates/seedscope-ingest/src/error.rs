//! Error types for catalog source loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading a catalog source.
///
/// Any of these fails the whole load; no partial data is returned.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Source file not found.
    #[error("source file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the configured size limit.
    #[error("file {path} is too large ({size} bytes, limit {max_size} bytes)")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// File is not UTF-8.
    #[error("unsupported encoding {encoding} in {path}; save the file as UTF-8")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    /// Format could not be inferred from the file name.
    #[error("cannot infer source format of {path}; expected a .csv or .json file")]
    UnknownFormat { path: PathBuf },

    // === Parsing Errors ===
    /// Malformed CSV.
    #[error("failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Malformed JSON.
    #[error("failed to parse JSON {path}: {source}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Well-formed input with the wrong overall shape.
    #[error("unexpected source shape in {path}: {reason}")]
    UnexpectedShape { path: PathBuf, reason: String },

    /// No header row (CSV) or no content at all.
    #[error("source is empty: {path}")]
    EmptySource { path: PathBuf },
}

impl IngestError {
    /// Map an I/O error on `path`, distinguishing a missing file.
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::FileRead {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/data/varieties.json"),
        };
        assert_eq!(err.to_string(), "source file not found: /data/varieties.json");
    }

    #[test]
    fn test_io_not_found_maps_to_file_not_found() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = IngestError::io(Path::new("missing.csv"), source);
        assert!(matches!(err, IngestError::FileNotFound { .. }));

        let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = IngestError::io(Path::new("locked.csv"), source);
        assert!(matches!(err, IngestError::FileRead { .. }));
    }
}
