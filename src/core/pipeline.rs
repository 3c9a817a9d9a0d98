//! Middleware chain
//!
//! A [`Next`] is the remainder of one call's chain: the layers not yet
//! entered plus the backend at the end. Each step peels off the most
//! recently added layer, so layers are entered last-added first and exited
//! in the order they were added.

use std::sync::Arc;

use crate::core::backend::Backend;
use crate::core::error::CoreResult;
use crate::core::middleware::Middleware;
use crate::field::FieldMap;

/// Next middleware in chain
pub struct Next<'a, E> {
    middleware: &'a [Arc<dyn Middleware<E>>],
    backend: &'a dyn Backend<E>,
}

impl<'a, E> Next<'a, E> {
    /// Builds the chain for one call. `middleware` is in the order the
    /// layers were added.
    pub fn new(middleware: &'a [Arc<dyn Middleware<E>>], backend: &'a dyn Backend<E>) -> Self {
        Self {
            middleware,
            backend,
        }
    }

    /// Layers still to be entered
    pub fn remaining(&self) -> usize {
        self.middleware.len()
    }

    fn step(&self) -> Option<(&'a Arc<dyn Middleware<E>>, Next<'a, E>)> {
        self.middleware.split_last().map(|(layer, rest)| {
            (
                layer,
                Next {
                    middleware: rest,
                    backend: self.backend,
                },
            )
        })
    }

    /// Run the next layer's add hook, or the backend's add
    pub fn add(self, entities: Vec<E>) -> CoreResult<()> {
        match self.step() {
            Some((layer, next)) => layer.add(entities, next),
            None => self.backend.add(entities),
        }
    }

    /// Run the next layer's query hook, or the backend's query
    pub fn query(self, filters: FieldMap, limit: Option<usize>) -> CoreResult<Vec<E>> {
        match self.step() {
            Some((layer, next)) => layer.query(filters, limit, next),
            None => self.backend.query(&filters, limit),
        }
    }

    /// Run the next layer's update hook, or the backend's update
    pub fn update(self, updates: FieldMap, filters: FieldMap) -> CoreResult<usize> {
        match self.step() {
            Some((layer, next)) => layer.update(updates, filters, next),
            None => self.backend.update(&updates, &filters),
        }
    }

    /// Run the next layer's delete hook, or the backend's delete
    pub fn delete(self, filters: FieldMap) -> CoreResult<usize> {
        match self.step() {
            Some((layer, next)) => layer.delete(filters, next),
            None => self.backend.delete(&filters),
        }
    }
}
