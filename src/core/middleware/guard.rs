//! Read-only Middleware
//!
//! Refuses every write before it reaches the rest of the chain.

use crate::core::error::{CoreError, CoreResult};
use crate::core::operation::Operation;
use crate::core::pipeline::Next;
use crate::field::FieldMap;

use super::Middleware;

/// Rejects add, update and delete; queries pass through
pub struct ReadOnlyMiddleware {
    reason: String,
}

impl ReadOnlyMiddleware {
    /// Create a guard with the default refusal message
    pub fn new() -> Self {
        Self::with_reason("repository is read-only")
    }

    /// Create a guard that refuses with a custom message
    pub fn with_reason(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn refuse(&self, op: Operation) -> CoreError {
        tracing::debug!(operation = op.name(), reason = %self.reason, "write refused");
        CoreError::rejected(format!("{} refused: {}", op, self.reason))
    }
}

impl Default for ReadOnlyMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Middleware<E> for ReadOnlyMiddleware {
    fn add(&self, _entities: Vec<E>, _next: Next<'_, E>) -> CoreResult<()> {
        Err(self.refuse(Operation::Add))
    }

    fn update(&self, _updates: FieldMap, _filters: FieldMap, _next: Next<'_, E>) -> CoreResult<usize> {
        Err(self.refuse(Operation::Update))
    }

    fn delete(&self, _filters: FieldMap, _next: Next<'_, E>) -> CoreResult<usize> {
        Err(self.refuse(Operation::Delete))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::backend::Backend;
    use std::sync::Arc;

    struct FixedBackend;

    impl Backend<u8> for FixedBackend {
        fn add(&self, _: Vec<u8>) -> CoreResult<()> {
            Ok(())
        }
        fn query(&self, _: &FieldMap, _: Option<usize>) -> CoreResult<Vec<u8>> {
            Ok(vec![9])
        }
        fn update(&self, _: &FieldMap, _: &FieldMap) -> CoreResult<usize> {
            Ok(1)
        }
        fn delete(&self, _: &FieldMap) -> CoreResult<usize> {
            Ok(1)
        }
    }

    fn layers() -> Vec<Arc<dyn Middleware<u8>>> {
        vec![Arc::new(ReadOnlyMiddleware::new())]
    }

    #[test]
    fn test_writes_rejected() {
        let layers = layers();
        let err = Next::new(&layers, &FixedBackend).add(vec![1]).unwrap_err();
        assert_eq!(err, CoreError::Rejected("add refused: repository is read-only".into()));

        let err = Next::new(&layers, &FixedBackend)
            .delete(FieldMap::new())
            .unwrap_err();
        assert_eq!(err.code(), "REPO_REJECTED");
    }

    #[test]
    fn test_query_passes() {
        let layers = layers();
        let found = Next::new(&layers, &FixedBackend).query(FieldMap::new(), None).unwrap();
        assert_eq!(found, vec![9]);
    }

    #[test]
    fn test_custom_reason() {
        let layers: Vec<Arc<dyn Middleware<u8>>> =
            vec![Arc::new(ReadOnlyMiddleware::with_reason("maintenance window"))];
        let err = Next::new(&layers, &FixedBackend)
            .update(FieldMap::new(), FieldMap::new())
            .unwrap_err();
        assert_eq!(err.to_string(), "Rejected: update refused: maintenance window");
    }
}
