//! Core Error Types
//!
//! Errors raised while an operation runs through the pipeline. Backends and
//! middleware produce them; the façade passes them back unchanged.

use thiserror::Error;

use crate::field::FieldError;

/// Core module result type
pub type CoreResult<T> = Result<T, CoreError>;

/// Core error type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// Storage backend failure
    #[error("Backend error: {0}")]
    Backend(String),

    /// A middleware layer refused the call
    #[error("Rejected: {0}")]
    Rejected(String),

    /// A field value could not be applied to a record
    #[error("Field error: {0}")]
    Field(#[from] FieldError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Create a backend error
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// Create a rejection error
    pub fn rejected(msg: impl Into<String>) -> Self {
        Self::Rejected(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get error code for logs and callers
    pub fn code(&self) -> &'static str {
        match self {
            Self::Backend(_) => "REPO_BACKEND_ERROR",
            Self::Rejected(_) => "REPO_REJECTED",
            Self::Field(err) => err.code(),
            Self::Internal(_) => "REPO_INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(CoreError::backend("disk").code(), "REPO_BACKEND_ERROR");
        assert_eq!(CoreError::rejected("read-only").code(), "REPO_REJECTED");
        assert_eq!(CoreError::internal("poisoned").code(), "REPO_INTERNAL_ERROR");
        assert_eq!(CoreError::from(FieldError::unknown("x")).code(), "REPO_UNKNOWN_FIELD");
    }

    #[test]
    fn test_display() {
        assert_eq!(CoreError::rejected("read-only").to_string(), "Rejected: read-only");
        assert_eq!(
            CoreError::from(FieldError::unknown("x")).to_string(),
            "Field error: Unknown field: x"
        );
    }
}
