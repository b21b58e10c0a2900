//! Error types for the Chartwise library.
//!
//! Analysis, cleaning, suggestion and chart generation never fail on data;
//! these errors only come from file access, parsing and configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Chartwise operations.
#[derive(Debug, Error)]
pub enum ChartwiseError {
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

    /// Empty file or no data to analyze.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Chart type name not recognized.
    #[error("Unknown chart type: {0}")]
    UnknownChartType(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Chartwise operations.
pub type Result<T> = std::result::Result<T, ChartwiseError>;
