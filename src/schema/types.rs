//! Schema type definitions
//!
//! A declared field type is one of the registered kinds, `optional<T>` of a
//! kind, or an unsupported type kept by its canonical text so the validator
//! can report it verbatim.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::field::{Field, FieldKind, FieldResult, FieldValue};

/// The declared type of a shape field
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    Integer,
    Real,
    Boolean,
    Text,
    Timestamp,
    /// The inner type or absent
    Optional(Box<FieldType>),
    /// Any type outside the kind registry, e.g. `map<text,text>`
    Unsupported(String),
}

impl FieldType {
    /// The declared type for a registered kind
    pub fn of(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Integer => FieldType::Integer,
            FieldKind::Real => FieldType::Real,
            FieldKind::Boolean => FieldType::Boolean,
            FieldKind::Text => FieldType::Text,
            FieldKind::Timestamp => FieldType::Timestamp,
        }
    }

    /// Wraps a type as optional. Wrapping an optional type is a no-op.
    pub fn optional(inner: FieldType) -> Self {
        match inner {
            FieldType::Optional(_) => inner,
            other => FieldType::Optional(Box::new(other)),
        }
    }

    /// A type outside the registry, identified by its canonical text
    pub fn unsupported(repr: impl Into<String>) -> Self {
        FieldType::Unsupported(repr.into())
    }

    /// This type wrapped as optional
    pub fn to_optional(&self) -> Self {
        Self::optional(self.clone())
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, FieldType::Optional(_))
    }

    /// The registered kind after unwrapping one level of optionality, or
    /// `None` when the type is not supported
    pub fn kind(&self) -> Option<FieldKind> {
        match self {
            FieldType::Optional(inner) => inner.primitive_kind(),
            other => other.primitive_kind(),
        }
    }

    /// Whether a companion field declared as `declared` is compatible with
    /// a field of this type: the same type, or this type made optional.
    pub fn admits(&self, declared: &FieldType) -> bool {
        declared == self || *declared == self.to_optional()
    }

    fn primitive_kind(&self) -> Option<FieldKind> {
        match self {
            FieldType::Integer => Some(FieldKind::Integer),
            FieldType::Real => Some(FieldKind::Real),
            FieldType::Boolean => Some(FieldKind::Boolean),
            FieldType::Text => Some(FieldKind::Text),
            FieldType::Timestamp => Some(FieldKind::Timestamp),
            FieldType::Optional(_) | FieldType::Unsupported(_) => None,
        }
    }
}

impl From<FieldKind> for FieldType {
    fn from(kind: FieldKind) -> Self {
        Self::of(kind)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Optional(inner) => write!(f, "optional<{}>", inner),
            FieldType::Unsupported(repr) => f.write_str(repr),
            other => match other.primitive_kind() {
                Some(kind) => f.write_str(kind.name()),
                None => Ok(()),
            },
        }
    }
}

impl FromStr for FieldType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(inner) = s.strip_prefix("optional<").and_then(|rest| rest.strip_suffix('>')) {
            return Ok(Self::optional(inner.parse()?));
        }
        Ok(match FieldKind::from_name(s) {
            Some(kind) => Self::of(kind),
            None => Self::unsupported(s),
        })
    }
}

impl From<String> for FieldType {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(field_type) => field_type,
            Err(never) => match never {},
        }
    }
}

impl From<FieldType> for String {
    fn from(field_type: FieldType) -> Self {
        field_type.to_string()
    }
}

/// One entry of a shape's descriptor table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, field_type: impl Into<FieldType>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
        }
    }

    /// Registered kind after unwrapping optionality
    pub fn kind(&self) -> Option<FieldKind> {
        self.field_type.kind()
    }

    pub fn is_optional(&self) -> bool {
        self.field_type.is_optional()
    }
}

/// Ordered descriptor table of one shape
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Shape name, used in logs
    pub name: String,
    fields: Vec<FieldDescriptor>,
}

impl Schema {
    /// Create an empty schema
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Builder-style [`Schema::push`]
    pub fn with_field(mut self, name: impl Into<String>, field_type: impl Into<FieldType>) -> Self {
        self.push(FieldDescriptor::new(name, field_type));
        self
    }

    /// Appends a descriptor. A descriptor with the same name replaces the
    /// earlier one and keeps its position.
    pub fn push(&mut self, descriptor: FieldDescriptor) {
        match self.fields.iter_mut().find(|f| f.name == descriptor.name) {
            Some(existing) => *existing = descriptor,
            None => self.fields.push(descriptor),
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Field names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A shape with a descriptor table and an accessor table.
///
/// `schema` lists the declared fields; `field` and `set_field` read and
/// write them by name. Use [`record!`](crate::record) to generate all three
/// from a struct's field list.
pub trait Record {
    /// Descriptor table, in declaration order
    fn schema() -> Schema;

    /// Reads a field by name. `None` when the field is absent, unset, or
    /// not declared by this shape.
    fn field(&self, name: &str) -> Option<Field>;

    /// Writes a field by name
    fn set_field(&mut self, name: &str, value: Field) -> FieldResult<()>;
}

/// Declared type of a struct field, picked up from the accessor's return
/// type. Used by [`record!`](crate::record).
pub fn declared_type<S, T: FieldValue>(_accessor: impl Fn(&S) -> &T) -> FieldType {
    T::field_type()
}

/// Implements [`Record`] for a struct from the list of its fields.
///
/// Every listed field must have a [`FieldValue`](crate::field::FieldValue)
/// type. Fields are declared in the order given.
///
/// ```ignore
/// #[derive(Clone)]
/// struct Person { id: String, name: String, age: i64 }
/// repokit::record!(Person { id, name, age });
/// ```
#[macro_export]
macro_rules! record {
    ($shape:ident { $($field:ident),* $(,)? }) => {
        impl $crate::schema::Record for $shape {
            fn schema() -> $crate::schema::Schema {
                $crate::schema::Schema::new(stringify!($shape))
                    $(.with_field(
                        stringify!($field),
                        $crate::schema::declared_type(|record: &$shape| &record.$field),
                    ))*
            }

            fn field(&self, name: &str) -> ::std::option::Option<$crate::field::Field> {
                match name {
                    $(stringify!($field) => $crate::field::FieldValue::to_field(&self.$field),)*
                    _ => ::std::option::Option::None,
                }
            }

            #[allow(unused_variables)]
            fn set_field(
                &mut self,
                name: &str,
                value: $crate::field::Field,
            ) -> $crate::field::FieldResult<()> {
                match name {
                    $(stringify!($field) => match $crate::field::FieldValue::from_field(value) {
                        ::std::result::Result::Ok(v) => {
                            self.$field = v;
                            ::std::result::Result::Ok(())
                        }
                        ::std::result::Result::Err(rejected) => {
                            let declared =
                                $crate::schema::declared_type(|record: &$shape| &record.$field);
                            ::std::result::Result::Err($crate::field::FieldError::kind_mismatch(
                                name,
                                declared.to_string(),
                                rejected.kind(),
                            ))
                        }
                    },)*
                    _ => ::std::result::Result::Err($crate::field::FieldError::unknown(name)),
                }
            }
        }
    };
}
