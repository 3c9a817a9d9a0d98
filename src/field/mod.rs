//! Field values for repokit
//!
//! The closed set of primitive kinds a shape may declare, the runtime value
//! that carries one of them, and the string-keyed map used to hand filters
//! and updates to a backend.
//!
//! - [`FieldKind`]: integer, real, boolean, text, timestamp
//! - [`Field`]: a value of one of those kinds
//! - [`FieldValue`]: conversion between Rust types and [`Field`]
//! - [`FieldMap`]: name -> value lookup crossing the backend boundary

mod kind;
mod map;
mod value;

pub use kind::FieldKind;
pub use map::FieldMap;
pub use value::{Field, FieldValue};

use thiserror::Error;

/// Result type for field accessors
pub type FieldResult<T> = Result<T, FieldError>;

/// Errors raised by a shape's setter table
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    /// The shape has no field with this name
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// The value's kind does not fit the field
    #[error("Field \"{field}\" expects {expected}, got {actual}")]
    KindMismatch {
        field: String,
        expected: String,
        actual: FieldKind,
    },
}

impl FieldError {
    /// Create an unknown field error
    pub fn unknown(field: impl Into<String>) -> Self {
        Self::UnknownField(field.into())
    }

    /// Create a kind mismatch error
    pub fn kind_mismatch(field: impl Into<String>, expected: impl Into<String>, actual: FieldKind) -> Self {
        Self::KindMismatch {
            field: field.into(),
            expected: expected.into(),
            actual,
        }
    }

    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownField(_) => "REPO_UNKNOWN_FIELD",
            Self::KindMismatch { .. } => "REPO_FIELD_KIND_MISMATCH",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mismatch_display() {
        let err = FieldError::kind_mismatch("age", "integer", FieldKind::Text);
        assert_eq!(err.to_string(), "Field \"age\" expects integer, got text");
        assert_eq!(err.code(), "REPO_FIELD_KIND_MISMATCH");
    }

    #[test]
    fn test_unknown_field_display() {
        let err = FieldError::unknown("nickname");
        assert_eq!(err.to_string(), "Unknown field: nickname");
    }
}
