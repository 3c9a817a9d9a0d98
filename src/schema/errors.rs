//! Schema error types
//!
//! Error codes:
//! - REPO_UNSUPPORTED_FIELD_TYPE
//! - REPO_INCOMPATIBLE_SCHEMA
//!
//! Both are raised once, while a repository is being built, and are fatal
//! to construction.

use std::fmt;
use thiserror::Error;

use super::types::FieldType;

/// Which companion shape failed the compatibility check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaRole {
    Filter,
    Update,
}

impl SchemaRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaRole::Filter => "Filter",
            SchemaRole::Update => "Update",
        }
    }
}

impl fmt::Display for SchemaRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a companion field was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Incompatibility {
    /// The entity declares no field with this name
    NotInEntity,
    /// The declared type is neither `desired` nor `optional<desired>`
    TypeMismatch { desired: FieldType },
}

impl fmt::Display for Incompatibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Incompatibility::NotInEntity => write!(f, "not in entity type"),
            Incompatibility::TypeMismatch { desired } => {
                write!(f, "should have type {}/{}", desired, desired.to_optional())
            }
        }
    }
}

/// Construction-time schema error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// An entity field's type is outside the kind registry
    #[error("Field type \"{field_type}\" not supported")]
    UnsupportedFieldType { field: String, field_type: FieldType },

    /// A filter or update field does not fit the entity
    #[error("{role} type not compatible: field \"{field}\" {reason}")]
    IncompatibleSchema {
        role: SchemaRole,
        field: String,
        reason: Incompatibility,
    },
}

impl SchemaError {
    /// Create an unsupported field type error
    pub fn unsupported(field: impl Into<String>, field_type: FieldType) -> Self {
        Self::UnsupportedFieldType {
            field: field.into(),
            field_type,
        }
    }

    /// Create an error for a companion field missing from the entity
    pub fn not_in_entity(role: SchemaRole, field: impl Into<String>) -> Self {
        Self::IncompatibleSchema {
            role,
            field: field.into(),
            reason: Incompatibility::NotInEntity,
        }
    }

    /// Create an error for a companion field with the wrong type
    pub fn type_mismatch(role: SchemaRole, field: impl Into<String>, desired: FieldType) -> Self {
        Self::IncompatibleSchema {
            role,
            field: field.into(),
            reason: Incompatibility::TypeMismatch { desired },
        }
    }

    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnsupportedFieldType { .. } => "REPO_UNSUPPORTED_FIELD_TYPE",
            Self::IncompatibleSchema { .. } => "REPO_INCOMPATIBLE_SCHEMA",
        }
    }

    /// Name of the offending field
    pub fn field(&self) -> &str {
        match self {
            Self::UnsupportedFieldType { field, .. } | Self::IncompatibleSchema { field, .. } => field,
        }
    }

    /// Companion role, for compatibility errors
    pub fn role(&self) -> Option<SchemaRole> {
        match self {
            Self::UnsupportedFieldType { .. } => None,
            Self::IncompatibleSchema { role, .. } => Some(*role),
        }
    }
}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;
