//! In-memory backend
//!
//! Keeps records in insertion order behind a single `RwLock`. Reads return
//! owned copies. An update batch is applied to copies first and committed
//! only when every setter accepted its value.

use std::sync::{PoisonError, RwLock};

use crate::core::{Backend, CoreError, CoreResult};
use crate::field::FieldMap;
use crate::Entity;

/// Volatile record store
pub struct InMemoryBackend<E> {
    records: RwLock<Vec<E>>,
}

fn poisoned<T>(_: PoisonError<T>) -> CoreError {
    CoreError::internal("in-memory store lock poisoned")
}

impl<E> InMemoryBackend<E> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    /// Number of stored records
    pub fn len(&self) -> CoreResult<usize> {
        Ok(self.records.read().map_err(poisoned)?.len())
    }

    pub fn is_empty(&self) -> CoreResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl<E: Clone> InMemoryBackend<E> {
    /// Start with `records` already stored
    pub fn with_records(records: Vec<E>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    /// Copy of every stored record, in insertion order
    pub fn records(&self) -> CoreResult<Vec<E>> {
        Ok(self.records.read().map_err(poisoned)?.clone())
    }
}

impl<E> Default for InMemoryBackend<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> Backend<E> for InMemoryBackend<E> {
    fn add(&self, entities: Vec<E>) -> CoreResult<()> {
        let mut records = self.records.write().map_err(poisoned)?;
        let added = entities.len();
        records.extend(entities);
        tracing::trace!(added, total = records.len(), "in-memory add");
        Ok(())
    }

    fn query(&self, filters: &FieldMap, limit: Option<usize>) -> CoreResult<Vec<E>> {
        let records = self.records.read().map_err(poisoned)?;
        let found: Vec<E> = records
            .iter()
            .filter(|record| filters.matches(*record))
            .take(limit.unwrap_or(usize::MAX))
            .cloned()
            .collect();
        tracing::trace!(found = found.len(), "in-memory query");
        Ok(found)
    }

    fn update(&self, updates: &FieldMap, filters: &FieldMap) -> CoreResult<usize> {
        if updates.is_empty() {
            return Ok(0);
        }

        let mut records = self.records.write().map_err(poisoned)?;

        let mut staged = Vec::new();
        for (position, record) in records.iter().enumerate() {
            if !filters.matches(record) {
                continue;
            }
            let mut copy = record.clone();
            for (name, value) in updates {
                copy.set_field(name, value.clone())?;
            }
            staged.push((position, copy));
        }

        let updated = staged.len();
        for (position, copy) in staged {
            records[position] = copy;
        }

        tracing::trace!(updated, "in-memory update");
        Ok(updated)
    }

    fn delete(&self, filters: &FieldMap) -> CoreResult<usize> {
        let mut records = self.records.write().map_err(poisoned)?;
        let before = records.len();
        records.retain(|record| !filters.matches(record));
        let deleted = before - records.len();
        tracing::trace!(deleted, "in-memory delete");
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldError;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        sku: String,
        qty: i64,
    }

    crate::record!(Item { sku, qty });

    fn item(sku: &str, qty: i64) -> Item {
        Item {
            sku: sku.into(),
            qty,
        }
    }

    fn stocked() -> InMemoryBackend<Item> {
        InMemoryBackend::with_records(vec![item("a", 1), item("b", 2), item("c", 1)])
    }

    #[test]
    fn test_add_appends_in_order() {
        let backend: InMemoryBackend<Item> = InMemoryBackend::new();
        assert!(backend.is_empty().unwrap());
        backend.add(vec![item("a", 1)]).unwrap();
        backend.add(vec![item("b", 2), item("c", 3)]).unwrap();

        let skus: Vec<_> = backend.records().unwrap().into_iter().map(|i| i.sku).collect();
        assert_eq!(skus, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_query_filters_and_limits() {
        let backend = stocked();
        let ones = backend.query(&FieldMap::new().with("qty", 1i64), None).unwrap();
        assert_eq!(ones, vec![item("a", 1), item("c", 1)]);

        let first = backend.query(&FieldMap::new(), Some(1)).unwrap();
        assert_eq!(first, vec![item("a", 1)]);

        let none = backend.query(&FieldMap::new().with("sku", "zzz"), None).unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_query_returns_copies() {
        let backend = stocked();
        let mut found = backend.query(&FieldMap::new(), None).unwrap();
        found[0].qty = 99;
        assert_eq!(backend.records().unwrap()[0].qty, 1);
    }

    #[test]
    fn test_update_counts_matches() {
        let backend = stocked();
        let updated = backend
            .update(&FieldMap::new().with("qty", 5i64), &FieldMap::new().with("qty", 1i64))
            .unwrap();
        assert_eq!(updated, 2);
        assert_eq!(backend.query(&FieldMap::new().with("qty", 5i64), None).unwrap().len(), 2);
    }

    #[test]
    fn test_empty_update_is_noop() {
        let backend = stocked();
        assert_eq!(backend.update(&FieldMap::new(), &FieldMap::new()).unwrap(), 0);
        assert_eq!(backend.records().unwrap(), stocked().records().unwrap());
    }

    #[test]
    fn test_failed_update_changes_nothing() {
        let backend = stocked();
        let updates = FieldMap::new().with("qty", 7i64).with("sku", true);
        let err = backend.update(&updates, &FieldMap::new()).unwrap_err();

        assert!(matches!(err, CoreError::Field(FieldError::KindMismatch { .. })));
        assert_eq!(backend.records().unwrap(), stocked().records().unwrap());
    }

    #[test]
    fn test_delete_removes_matches() {
        let backend = stocked();
        assert_eq!(backend.delete(&FieldMap::new().with("qty", 1i64)).unwrap(), 2);
        assert_eq!(backend.records().unwrap(), vec![item("b", 2)]);
        assert_eq!(backend.delete(&FieldMap::new()).unwrap(), 1);
        assert_eq!(backend.len().unwrap(), 0);
    }
}
