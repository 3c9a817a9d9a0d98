//! Runtime field values
//!
//! [`Field`] is the only value type that crosses the backend boundary.
//! [`FieldValue`] maps the Rust types a shape may use onto it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::kind::FieldKind;
use crate::schema::FieldType;

/// A present value of one of the registered kinds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Field {
    Integer(i64),
    Real(f64),
    Boolean(bool),
    Text(String),
    Timestamp(DateTime<Utc>),
}

impl Field {
    /// Returns the kind of this value
    pub fn kind(&self) -> FieldKind {
        match self {
            Field::Integer(_) => FieldKind::Integer,
            Field::Real(_) => FieldKind::Real,
            Field::Boolean(_) => FieldKind::Boolean,
            Field::Text(_) => FieldKind::Text,
            Field::Timestamp(_) => FieldKind::Timestamp,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Field::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_real(&self) -> Option<f64> {
        match self {
            Field::Real(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Field::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Field::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Field::Timestamp(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Integer(v) => write!(f, "{}", v),
            Field::Real(v) => write!(f, "{}", v),
            Field::Boolean(v) => write!(f, "{}", v),
            Field::Text(v) => write!(f, "{:?}", v),
            Field::Timestamp(v) => write!(f, "{}", v.to_rfc3339()),
        }
    }
}

impl From<i64> for Field {
    fn from(v: i64) -> Self {
        Field::Integer(v)
    }
}

impl From<i32> for Field {
    fn from(v: i32) -> Self {
        Field::Integer(i64::from(v))
    }
}

impl From<f64> for Field {
    fn from(v: f64) -> Self {
        Field::Real(v)
    }
}

impl From<bool> for Field {
    fn from(v: bool) -> Self {
        Field::Boolean(v)
    }
}

impl From<String> for Field {
    fn from(v: String) -> Self {
        Field::Text(v)
    }
}

impl From<&str> for Field {
    fn from(v: &str) -> Self {
        Field::Text(v.to_string())
    }
}

impl From<DateTime<Utc>> for Field {
    fn from(v: DateTime<Utc>) -> Self {
        Field::Timestamp(v)
    }
}

/// A Rust type that a shape field may be declared with.
///
/// Provides the declared [`FieldType`] for the descriptor table and the
/// getter/setter conversions for the accessor table. `Option<T>` declares
/// `optional<T>` and reads as absent when `None`.
pub trait FieldValue: Sized {
    /// The declared type of a field of this Rust type
    fn field_type() -> FieldType;

    /// Reads the value, `None` when absent
    fn to_field(&self) -> Option<Field>;

    /// Converts a value back, handing it back untouched when the kind does
    /// not fit
    fn from_field(field: Field) -> Result<Self, Field>;
}

impl FieldValue for i64 {
    fn field_type() -> FieldType {
        FieldType::Integer
    }

    fn to_field(&self) -> Option<Field> {
        Some(Field::Integer(*self))
    }

    fn from_field(field: Field) -> Result<Self, Field> {
        match field {
            Field::Integer(v) => Ok(v),
            other => Err(other),
        }
    }
}

impl FieldValue for f64 {
    fn field_type() -> FieldType {
        FieldType::Real
    }

    fn to_field(&self) -> Option<Field> {
        Some(Field::Real(*self))
    }

    fn from_field(field: Field) -> Result<Self, Field> {
        match field {
            Field::Real(v) => Ok(v),
            other => Err(other),
        }
    }
}

impl FieldValue for bool {
    fn field_type() -> FieldType {
        FieldType::Boolean
    }

    fn to_field(&self) -> Option<Field> {
        Some(Field::Boolean(*self))
    }

    fn from_field(field: Field) -> Result<Self, Field> {
        match field {
            Field::Boolean(v) => Ok(v),
            other => Err(other),
        }
    }
}

impl FieldValue for String {
    fn field_type() -> FieldType {
        FieldType::Text
    }

    fn to_field(&self) -> Option<Field> {
        Some(Field::Text(self.clone()))
    }

    fn from_field(field: Field) -> Result<Self, Field> {
        match field {
            Field::Text(v) => Ok(v),
            other => Err(other),
        }
    }
}

impl FieldValue for DateTime<Utc> {
    fn field_type() -> FieldType {
        FieldType::Timestamp
    }

    fn to_field(&self) -> Option<Field> {
        Some(Field::Timestamp(*self))
    }

    fn from_field(field: Field) -> Result<Self, Field> {
        match field {
            Field::Timestamp(v) => Ok(v),
            other => Err(other),
        }
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn field_type() -> FieldType {
        FieldType::optional(T::field_type())
    }

    fn to_field(&self) -> Option<Field> {
        self.as_ref().and_then(T::to_field)
    }

    fn from_field(field: Field) -> Result<Self, Field> {
        T::from_field(field).map(Some)
    }
}
