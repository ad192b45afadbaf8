use thiserror::Error;

/// Domain-level errors shared across application components.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The request missed a required parameter or carried an unusable value.
    #[error("validation error: {0}")]
    Validation(String),

    /// Reading or writing the backing files failed.
    #[error("storage failure: {0}")]
    Storage(String),

    /// A payload or a stored document was not valid JSON.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Any other unexpected failure.
    #[error("unexpected error: {0}")]
    Other(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// True for errors caused by the caller rather than by the service.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
