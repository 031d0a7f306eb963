//! Error types for the varstat library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for varstat operations.
#[derive(Debug, Error)]
pub enum VarstatError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// File format not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Empty file or no data to analyze.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Invalid analysis configuration. Rejected before any column is processed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A column whose variable type cannot be determined.
    #[error("Column '{column}' cannot be classified: {reason}")]
    Unclassifiable { column: String, reason: String },

    /// A statistic left the finite f64 range, e.g. a sum that overflows.
    #[error("Column '{column}': {statistic} is not finite")]
    NonFinite { column: String, statistic: String },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for varstat operations.
pub type Result<T> = std::result::Result<T, VarstatError>;
