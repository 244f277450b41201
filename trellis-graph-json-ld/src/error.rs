use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NormalizeError {
    /// The document, or one of its values, has an unsupported shape.
    #[error("malformed document: {message}")]
    MalformedDocument { message: String },

    /// The supplied subject term cannot appear in subject position.
    #[error("invalid subject term: {term}")]
    InvalidSubject { term: String },
}

impl NormalizeError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        NormalizeError::MalformedDocument {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, NormalizeError>;
