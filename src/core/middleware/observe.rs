//! Observability Middleware
//!
//! Wraps every repository call with a tracing event and keeps
//! per-operation success and error counters.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use serde::Serialize;
use uuid::Uuid;

use crate::core::config::ObserveConfig;
use crate::core::error::CoreResult;
use crate::core::operation::Operation;
use crate::core::pipeline::Next;
use crate::field::FieldMap;

use super::Middleware;

/// Point-in-time copy of the call counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ObserveSnapshot {
    successes: [u64; 4],
    errors: [u64; 4],
}

impl ObserveSnapshot {
    /// Calls of `op` that returned `Ok`
    pub fn successes(&self, op: Operation) -> u64 {
        self.successes[op.index()]
    }

    /// Calls of `op` that returned `Err`
    pub fn errors(&self, op: Operation) -> u64 {
        self.errors[op.index()]
    }

    /// All calls of `op`
    pub fn calls(&self, op: Operation) -> u64 {
        self.successes(op) + self.errors(op)
    }

    /// All calls across every operation
    pub fn total_calls(&self) -> u64 {
        self.successes.iter().chain(self.errors.iter()).sum()
    }
}

/// Observability middleware
pub struct ObserveMiddleware {
    config: ObserveConfig,
    successes: [AtomicU64; 4],
    errors: [AtomicU64; 4],
}

impl ObserveMiddleware {
    pub fn new(config: ObserveConfig) -> Self {
        Self {
            config,
            successes: Default::default(),
            errors: Default::default(),
        }
    }

    /// Counters only, no log events
    pub fn noop() -> Self {
        Self::new(ObserveConfig::disabled())
    }

    pub fn config(&self) -> &ObserveConfig {
        &self.config
    }

    /// Read the current counters
    pub fn snapshot(&self) -> ObserveSnapshot {
        let mut snapshot = ObserveSnapshot::default();
        for op in Operation::ALL {
            let i = op.index();
            snapshot.successes[i] = self.successes[i].load(Ordering::Relaxed);
            snapshot.errors[i] = self.errors[i].load(Ordering::Relaxed);
        }
        snapshot
    }

    fn arguments(&self, maps: &[&FieldMap]) -> Option<String> {
        if !self.config.log_arguments {
            return None;
        }
        let rendered: Vec<String> = maps
            .iter()
            .map(|map| serde_json::to_string(map).unwrap_or_default())
            .collect();
        Some(rendered.join(" "))
    }

    fn observe<T>(
        &self,
        op: Operation,
        input_size: usize,
        arguments: Option<String>,
        output_size: impl FnOnce(&T) -> usize,
        call: impl FnOnce() -> CoreResult<T>,
    ) -> CoreResult<T> {
        let started = Instant::now();
        let result = call();
        let elapsed_ms = started.elapsed().as_millis() as u64;

        let i = op.index();
        match &result {
            Ok(_) => self.successes[i].fetch_add(1, Ordering::Relaxed),
            Err(_) => self.errors[i].fetch_add(1, Ordering::Relaxed),
        };

        if !self.config.enabled {
            return result;
        }

        let call_id = Uuid::new_v4();
        let arguments = arguments.unwrap_or_default();
        match &result {
            Ok(value) => {
                tracing::debug!(
                    %call_id,
                    operation = op.name(),
                    input_size,
                    output_size = output_size(value),
                    elapsed_ms,
                    arguments = %arguments,
                    "repository call"
                );
            }
            Err(err) => {
                tracing::warn!(
                    %call_id,
                    operation = op.name(),
                    input_size,
                    elapsed_ms,
                    code = err.code(),
                    error = %err,
                    "repository call failed"
                );
            }
        }

        if elapsed_ms >= self.config.slow_call_threshold_ms {
            tracing::info!(
                %call_id,
                operation = op.name(),
                elapsed_ms,
                threshold_ms = self.config.slow_call_threshold_ms,
                "slow repository call"
            );
        }

        result
    }
}

impl Default for ObserveMiddleware {
    fn default() -> Self {
        Self::new(ObserveConfig::default())
    }
}

impl<E> Middleware<E> for ObserveMiddleware {
    fn add(&self, entities: Vec<E>, next: Next<'_, E>) -> CoreResult<()> {
        let count = entities.len();
        self.observe(Operation::Add, count, None, |_| count, || next.add(entities))
    }

    fn query(&self, filters: FieldMap, limit: Option<usize>, next: Next<'_, E>) -> CoreResult<Vec<E>> {
        let arguments = self.arguments(&[&filters]);
        self.observe(
            Operation::Query,
            filters.len(),
            arguments,
            |found: &Vec<E>| found.len(),
            || next.query(filters, limit),
        )
    }

    fn update(&self, updates: FieldMap, filters: FieldMap, next: Next<'_, E>) -> CoreResult<usize> {
        let arguments = self.arguments(&[&updates, &filters]);
        self.observe(
            Operation::Update,
            updates.len() + filters.len(),
            arguments,
            |count: &usize| *count,
            || next.update(updates, filters),
        )
    }

    fn delete(&self, filters: FieldMap, next: Next<'_, E>) -> CoreResult<usize> {
        let arguments = self.arguments(&[&filters]);
        self.observe(
            Operation::Delete,
            filters.len(),
            arguments,
            |count: &usize| *count,
            || next.delete(filters),
        )
    }
}
