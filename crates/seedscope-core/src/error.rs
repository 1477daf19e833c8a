//! Error types for the explorer core.

use thiserror::Error;

use seedscope_ingest::IngestError;

/// Errors raised by sessions, the explorer and export.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A view operation was attempted outside the `Ready` state.
    #[error("catalog is not ready (session is {state})")]
    NotReady { state: &'static str },

    /// Reading or parsing the source failed.
    #[error(transparent)]
    Load(#[from] IngestError),

    /// No record with the given id.
    #[error("no variety with id '{id}'")]
    RecordNotFound { id: String },

    /// Writing the CSV export failed.
    #[error("failed to write export: {source}")]
    Export {
        #[source]
        source: csv::Error,
    },
}

impl From<csv::Error> for CoreError {
    fn from(source: csv::Error) -> Self {
        Self::Export { source }
    }
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::NotReady { state: "loading" };
        assert_eq!(err.to_string(), "catalog is not ready (session is loading)");
        assert_eq!(
            CoreError::RecordNotFound {
                id: "rice-1".to_string()
            }
            .to_string(),
            "no variety with id 'rice-1'"
        );
    }
}
