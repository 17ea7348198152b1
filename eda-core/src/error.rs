//! Error types for the EDA core.
//!
//! Only malformed input is an error. Empty datasets (zero rows or zero columns)
//! are a normal condition and produce well-defined default results.

use thiserror::Error;

/// Result type for EDA operations.
pub type EdaResult<T> = Result<T, EdaError>;

/// Errors that can occur while analyzing a dataset.
#[derive(Error, Debug)]
pub enum EdaError {
    /// The dataset or the call parameters are malformed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Arrow computation error.
    #[error("Arrow computation failed: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl EdaError {
    /// Creates an invalid input error with the given message.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Returns true if this error was caused by malformed input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

/// Converts serde_json errors to EdaError.
impl From<serde_json::Error> for EdaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
