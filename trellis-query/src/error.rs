//! Error types for query evaluation

use thiserror::Error;

/// Query evaluation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    /// A constant position's lexical form collides with a variable name
    /// used elsewhere in the same pattern.
    #[error("invalid pattern: {message}")]
    InvalidPattern { message: String },
}

impl QueryError {
    pub(crate) fn invalid_pattern(message: impl Into<String>) -> Self {
        QueryError::InvalidPattern {
            message: message.into(),
        }
    }
}

/// Result type for query operations
pub type Result<T> = std::result::Result<T, QueryError>;
