use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// Triple violates the subject/predicate invariant.
    #[error("invalid triple: {message}")]
    InvalidTriple { message: String },
}

impl StoreError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        StoreError::InvalidTriple {
            message: message.into(),
        }
    }
}
