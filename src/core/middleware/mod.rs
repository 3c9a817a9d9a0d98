//! Middleware Traits and Implementations
//!
//! A middleware layer may intercept any of the four repository operations.
//! Every hook receives the call's arguments and the rest of the chain; the
//! provided implementations forward unchanged, so a layer only overrides
//! the operations it cares about.

use crate::core::error::CoreResult;
use crate::core::pipeline::Next;
use crate::field::FieldMap;

/// Middleware trait for repository calls
pub trait Middleware<E>: Send + Sync {
    /// Intercept `add`
    fn add(&self, entities: Vec<E>, next: Next<'_, E>) -> CoreResult<()> {
        next.add(entities)
    }

    /// Intercept `query`
    fn query(&self, filters: FieldMap, limit: Option<usize>, next: Next<'_, E>) -> CoreResult<Vec<E>> {
        next.query(filters, limit)
    }

    /// Intercept `update`
    fn update(&self, updates: FieldMap, filters: FieldMap, next: Next<'_, E>) -> CoreResult<usize> {
        next.update(updates, filters)
    }

    /// Intercept `delete`
    fn delete(&self, filters: FieldMap, next: Next<'_, E>) -> CoreResult<usize> {
        next.delete(filters)
    }
}

/// Composable middleware implementations
pub mod guard;
pub mod observe;
