//! Schema compatibility validator
//!
//! Checks, in order, stopping at the first violation:
//! 1. every entity field has a registered kind (after unwrapping optional)
//! 2. every filter field exists on the entity with the entity's type or its
//!    optional form
//! 3. the same for every update field
//!
//! Success yields the entity's field names in declaration order.

use std::fmt;
use std::sync::Arc;

use super::errors::{SchemaError, SchemaResult, SchemaRole};
use super::types::{Record, Schema};

/// Canonical field list: the validated entity field names, frozen.
///
/// Cheap to clone; every clone shares the same names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldList {
    names: Arc<[String]>,
}

impl FieldList {
    fn from_schema(schema: &Schema) -> Self {
        Self {
            names: schema.names().map(str::to_string).collect(),
        }
    }

    /// Names in entity declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl fmt::Display for FieldList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.names.join(", "))
    }
}

/// Validates an entity schema against its filter and update schemas.
///
/// Stateless; validation is deterministic and never mutates the schemas.
pub struct SchemaValidator;

impl SchemaValidator {
    /// Validates the three descriptor tables and returns the entity's field
    /// list.
    ///
    /// # Errors
    ///
    /// - `UnsupportedFieldType` for the first entity field outside the
    ///   registry
    /// - `IncompatibleSchema` for the first filter (then update) field that
    ///   is missing from the entity or has a different type
    pub fn validate(entity: &Schema, filter: &Schema, update: &Schema) -> SchemaResult<FieldList> {
        Self::check_entity(entity)?;
        Self::check_companion(SchemaRole::Filter, entity, filter)?;
        Self::check_companion(SchemaRole::Update, entity, update)?;

        Ok(FieldList::from_schema(entity))
    }

    /// Same as [`SchemaValidator::validate`], reading the descriptor tables
    /// off the shapes.
    pub fn validate_shapes<E: Record, F: Record, U: Record>() -> SchemaResult<FieldList> {
        Self::validate(&E::schema(), &F::schema(), &U::schema())
    }

    fn check_entity(entity: &Schema) -> SchemaResult<()> {
        for descriptor in entity.fields() {
            if descriptor.kind().is_none() {
                return Err(SchemaError::unsupported(
                    &descriptor.name,
                    descriptor.field_type.clone(),
                ));
            }
        }
        Ok(())
    }

    fn check_companion(role: SchemaRole, entity: &Schema, companion: &Schema) -> SchemaResult<()> {
        for descriptor in companion.fields() {
            let desired = entity
                .field(&descriptor.name)
                .ok_or_else(|| SchemaError::not_in_entity(role, &descriptor.name))?;

            if !desired.field_type.admits(&descriptor.field_type) {
                return Err(SchemaError::type_mismatch(
                    role,
                    &descriptor.name,
                    desired.field_type.clone(),
                ));
            }
        }
        Ok(())
    }
}
