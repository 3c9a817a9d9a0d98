//! Storage backend contract
//!
//! The only boundary the repository depends on. Filters and updates arrive
//! as [`FieldMap`]s holding entity field names.

use crate::core::error::CoreResult;
use crate::field::FieldMap;

/// Trait for the storage backend.
///
/// Thread-safety is the backend's responsibility: the repository calls
/// these methods with no serialisation of its own.
pub trait Backend<E>: Send + Sync {
    /// Store one or more new records
    fn add(&self, entities: Vec<E>) -> CoreResult<()>;

    /// Records equal to every value in `filters`, at most `limit` of them.
    /// Empty filters match every record.
    fn query(&self, filters: &FieldMap, limit: Option<usize>) -> CoreResult<Vec<E>>;

    /// Apply `updates` to every record matching `filters`, returning how
    /// many were updated. Empty `updates` updates nothing and returns 0.
    fn update(&self, updates: &FieldMap, filters: &FieldMap) -> CoreResult<usize>;

    /// Remove every record matching `filters`, returning how many were
    /// removed
    fn delete(&self, filters: &FieldMap) -> CoreResult<usize>;
}
