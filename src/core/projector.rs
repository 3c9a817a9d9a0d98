//! Field projection
//!
//! Turns a typed filter or update into the [`FieldMap`] a backend sees.

use crate::field::FieldMap;
use crate::schema::{FieldList, Record};

/// Projects shape instances onto the canonical field list
pub struct FieldProjector;

impl FieldProjector {
    /// Reads every listed field off `instance` and keeps the present ones.
    ///
    /// Keys are always a subset of `fields`. Values are taken as-is; their
    /// kinds were fixed when the schemas were validated.
    pub fn project<R: Record>(instance: &R, fields: &FieldList) -> FieldMap {
        fields
            .names()
            .filter_map(|name| instance.field(name).map(|value| (name.to_string(), value)))
            .collect()
    }
}
