//! Field maps
//!
//! The backend-facing form of filters and updates. Keys are entity field
//! names; only present values are stored.

use serde::{Deserialize, Serialize};
use std::collections::hash_map;
use std::collections::HashMap;

use super::value::Field;
use crate::schema::Record;

/// String-keyed lookup of present field values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMap {
    values: HashMap<String, Field>,
}

impl FieldMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning the previous one for that name
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Field>) -> Option<Field> {
        self.values.insert(name.into(), value.into())
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Field>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn remove(&mut self, name: &str) -> Option<Field> {
        self.values.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, Field> {
        self.values.iter()
    }

    /// Field names present in this map, in no particular order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Checks whether a record equals every value in this map.
    ///
    /// An empty map matches every record. A record whose field is absent
    /// never matches a constraint on that field.
    pub fn matches<R: Record>(&self, record: &R) -> bool {
        self.values
            .iter()
            .all(|(name, expected)| record.field(name).as_ref() == Some(expected))
    }
}

impl FromIterator<(String, Field)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (String, Field)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for FieldMap {
    type Item = (String, Field);
    type IntoIter = hash_map::IntoIter<String, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> IntoIterator for &'a FieldMap {
    type Item = (&'a String, &'a Field);
    type IntoIter = hash_map::Iter<'a, String, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
