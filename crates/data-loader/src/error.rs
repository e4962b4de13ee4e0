//! Error types for the data-loader crate.
//!
//! Every failure carries enough context (file, line, field) to point at the
//! offending record in the dataset.

use thiserror::Error;

/// Errors that can occur while loading and validating the movie dataset
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The JSON export could not be decoded
    #[error("Invalid JSON dataset: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Line in the text database couldn't be parsed
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Two records resolved to the same identifier
    #[error("Duplicate movie id: {id}")]
    DuplicateId { id: String },

    /// Data validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
