//! Error types for the selector crate.

use thiserror::Error;

/// Errors raised by the selectors
///
/// Raised before any candidate is touched, so a failed call never yields a
/// partial result. These signal a configuration mistake and are not worth
/// retrying.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// A parameter is outside its accepted range
    #[error("Invalid parameter {name}: {value} (must be at least {min})")]
    InvalidParameter {
        name: &'static str,
        value: i64,
        min: i64,
    },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, SelectionError>;
