//! Error types for marcbench

use thiserror::Error;

/// Result type alias for marcbench operations
pub type Result<T> = std::result::Result<T, BenchError>;

/// Main error type for marcbench
///
/// `Validation`, `SourceFetch` and `MalformedDataset` form the ingestion
/// taxonomy. None of them is recovered inside the ingestion path; they all
/// propagate to the caller.
#[derive(Error, Debug)]
pub enum BenchError {
    /// A required descriptor field is missing or out of range
    #[error("Validation error: {0}")]
    Validation(String),

    /// The remote hub is unreachable or does not know the dataset
    #[error("Failed to fetch '{dataset}' from the dataset hub: {reason}")]
    SourceFetch { dataset: String, reason: String },

    /// A local document folder carries an unparseable metadata file
    #[error("Malformed dataset file {path}: {reason}")]
    MalformedDataset { path: String, reason: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl BenchError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a source fetch error for a remote dataset
    pub fn source_fetch(dataset: impl Into<String>, reason: impl ToString) -> Self {
        Self::SourceFetch {
            dataset: dataset.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a malformed dataset error pointing at the offending file
    pub fn malformed(path: impl Into<String>, reason: impl ToString) -> Self {
        Self::MalformedDataset {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = BenchError::validation("path is required for local datasets");
        assert_eq!(err.to_string(), "Validation error: path is required for local datasets");

        let err = BenchError::source_fetch("acme/scans", "404 Not Found");
        assert_eq!(
            err.to_string(),
            "Failed to fetch 'acme/scans' from the dataset hub: 404 Not Found"
        );

        let err = BenchError::malformed("/data/doc_001/page_texts.json", "expected value");
        assert!(err.to_string().contains("/data/doc_001/page_texts.json"));
    }
}
