//! Repository Façade
//!
//! [`RepositoryFactory`] validates the entity, filter and update shapes once
//! and returns a [`Repository`]. Each call on the façade projects its typed
//! arguments to field maps and runs them through the middleware chain to the
//! backend.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::core::backend::Backend;
use crate::core::error::CoreResult;
use crate::core::middleware::Middleware;
use crate::core::pipeline::Next;
use crate::core::projector::FieldProjector;
use crate::schema::{FieldList, Record, SchemaResult, SchemaValidator};
use crate::Entity;

/// Application-facing repository protocol
pub trait RepositoryOps<E, F, U> {
    /// Store new records
    fn add(&self, entities: Vec<E>) -> CoreResult<()>;

    /// Records matching `filters`, at most `limit` of them
    fn query(&self, filters: &F, limit: Option<usize>) -> CoreResult<Vec<E>>;

    /// Apply `updates` to records matching `filters`
    fn update(&self, updates: &U, filters: &F) -> CoreResult<usize>;

    /// Remove records matching `filters`
    fn delete(&self, filters: &F) -> CoreResult<usize>;
}

/// Typed repository over a backend and an ordered middleware list.
///
/// Immutable once built. [`Repository::with_middleware`] returns a new
/// façade and leaves the receiver as it was.
pub struct Repository<E, F, U> {
    backend: Arc<dyn Backend<E>>,
    fields: FieldList,
    middleware: Vec<Arc<dyn Middleware<E>>>,
    shapes: PhantomData<fn(&F, &U)>,
}

impl<E, F, U> Clone for Repository<E, F, U> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            fields: self.fields.clone(),
            middleware: self.middleware.clone(),
            shapes: PhantomData,
        }
    }
}

impl<E, F, U> fmt::Debug for Repository<E, F, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository")
            .field("fields", &self.fields)
            .field("middleware", &self.middleware.len())
            .finish()
    }
}

impl<E, F, U> Repository<E, F, U>
where
    E: Entity,
    F: Record,
    U: Record,
{
    fn chain(&self) -> Next<'_, E> {
        Next::new(&self.middleware, self.backend.as_ref())
    }

    /// Store new records. Entities go to the chain as given.
    pub fn add(&self, entities: Vec<E>) -> CoreResult<()> {
        self.chain().add(entities)
    }

    /// Store a single record
    pub fn add_one(&self, entity: E) -> CoreResult<()> {
        self.add(vec![entity])
    }

    /// Records matching every present value of `filters`
    pub fn query(&self, filters: &F, limit: Option<usize>) -> CoreResult<Vec<E>> {
        let filters = FieldProjector::project(filters, &self.fields);
        self.chain().query(filters, limit)
    }

    /// Apply the present values of `updates` to every record matching
    /// `filters`. Returns the count the backend reports.
    pub fn update(&self, updates: &U, filters: &F) -> CoreResult<usize> {
        let updates = FieldProjector::project(updates, &self.fields);
        let filters = FieldProjector::project(filters, &self.fields);
        self.chain().update(updates, filters)
    }

    /// Remove every record matching `filters`
    pub fn delete(&self, filters: &F) -> CoreResult<usize> {
        let filters = FieldProjector::project(filters, &self.fields);
        self.chain().delete(filters)
    }

    /// New façade with `layer` appended. The new layer is entered first.
    pub fn with_middleware(&self, layer: impl Middleware<E> + 'static) -> Self {
        self.with_shared_middleware(Arc::new(layer))
    }

    /// Like [`Repository::with_middleware`] for a layer already behind an
    /// `Arc`, so the caller can keep a handle to it
    pub fn with_shared_middleware(&self, layer: Arc<dyn Middleware<E>>) -> Self {
        let mut derived = self.clone();
        derived.middleware.push(layer);
        derived
    }

    /// The canonical field list
    pub fn fields(&self) -> &FieldList {
        &self.fields
    }

    /// Get the number of middleware layers
    pub fn middleware_count(&self) -> usize {
        self.middleware.len()
    }
}

impl<E, F, U> RepositoryOps<E, F, U> for Repository<E, F, U>
where
    E: Entity,
    F: Record,
    U: Record,
{
    fn add(&self, entities: Vec<E>) -> CoreResult<()> {
        Repository::add(self, entities)
    }

    fn query(&self, filters: &F, limit: Option<usize>) -> CoreResult<Vec<E>> {
        Repository::query(self, filters, limit)
    }

    fn update(&self, updates: &U, filters: &F) -> CoreResult<usize> {
        Repository::update(self, updates, filters)
    }

    fn delete(&self, filters: &F) -> CoreResult<usize> {
        Repository::delete(self, filters)
    }
}

/// Builds repositories
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Validate the three shapes and build a façade over `backend` with no
    /// middleware.
    ///
    /// # Errors
    ///
    /// Any [`SchemaError`](crate::schema::SchemaError) from validation,
    /// unchanged.
    pub fn create_repository<E, F, U, B>(backend: Arc<B>) -> SchemaResult<Repository<E, F, U>>
    where
        E: Entity,
        F: Record,
        U: Record,
        B: Backend<E> + 'static,
    {
        Self::from_shared_backend::<E, F, U>(backend)
    }

    /// Same as [`RepositoryFactory::create_repository`] for a backend
    /// already erased to a trait object
    pub fn from_shared_backend<E, F, U>(backend: Arc<dyn Backend<E>>) -> SchemaResult<Repository<E, F, U>>
    where
        E: Entity,
        F: Record,
        U: Record,
    {
        let fields = match SchemaValidator::validate_shapes::<E, F, U>() {
            Ok(fields) => fields,
            Err(err) => {
                tracing::warn!(code = err.code(), error = %err, "repository schema rejected");
                return Err(err);
            }
        };

        tracing::debug!(fields = %fields, "repository created");

        Ok(Repository {
            backend,
            fields,
            middleware: Vec::new(),
            shapes: PhantomData,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::CoreError;
    use crate::field::{Field, FieldMap};
    use crate::schema::SchemaError;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    struct Task {
        id: String,
        title: String,
        done: bool,
    }

    #[derive(Debug, Clone, Default)]
    struct TaskFilter {
        done: Option<bool>,
    }

    #[derive(Debug, Clone, Default)]
    struct TaskUpdate {
        title: Option<String>,
    }

    #[derive(Debug, Clone, Default)]
    struct WrongFilter {
        done: Option<String>,
    }

    crate::record!(Task { id, title, done });
    crate::record!(TaskFilter { done });
    crate::record!(TaskUpdate { title });
    crate::record!(WrongFilter { done });

    /// Backend that records the maps it receives
    #[derive(Default)]
    struct RecordingBackend {
        seen: Mutex<Vec<(&'static str, FieldMap, FieldMap)>>,
    }

    impl Backend<Task> for RecordingBackend {
        fn add(&self, entities: Vec<Task>) -> CoreResult<()> {
            let ids: FieldMap = entities
                .iter()
                .map(|t| (t.id.clone(), Field::Boolean(t.done)))
                .collect();
            self.seen.lock().unwrap().push(("add", ids, FieldMap::new()));
            Ok(())
        }

        fn query(&self, filters: &FieldMap, _: Option<usize>) -> CoreResult<Vec<Task>> {
            self.seen.lock().unwrap().push(("query", filters.clone(), FieldMap::new()));
            Ok(Vec::new())
        }

        fn update(&self, updates: &FieldMap, filters: &FieldMap) -> CoreResult<usize> {
            self.seen.lock().unwrap().push(("update", updates.clone(), filters.clone()));
            Ok(3)
        }

        fn delete(&self, _: &FieldMap) -> CoreResult<usize> {
            Err(CoreError::backend("delete unsupported"))
        }
    }

    fn task_repo(backend: Arc<RecordingBackend>) -> Repository<Task, TaskFilter, TaskUpdate> {
        RepositoryFactory::create_repository(backend).unwrap()
    }

    #[test]
    fn test_factory_freezes_field_list() {
        let repo = task_repo(Arc::new(RecordingBackend::default()));
        assert_eq!(repo.fields().to_string(), "[id, title, done]");
        assert_eq!(repo.middleware_count(), 0);
    }

    #[test]
    fn test_factory_rejects_mismatched_filter() {
        let result: SchemaResult<Repository<Task, WrongFilter, TaskUpdate>> =
            RepositoryFactory::create_repository(Arc::new(RecordingBackend::default()));
        let err = result.unwrap_err();
        assert!(matches!(err, SchemaError::IncompatibleSchema { .. }));
        assert_eq!(
            err.to_string(),
            "Filter type not compatible: field \"done\" should have type boolean/optional<boolean>"
        );
    }

    #[test]
    fn test_calls_project_arguments() {
        let backend = Arc::new(RecordingBackend::default());
        let repo = task_repo(backend.clone());

        repo.query(&TaskFilter { done: Some(false) }, None).unwrap();
        let updated = repo
            .update(
                &TaskUpdate {
                    title: Some("ship".into()),
                },
                &TaskFilter::default(),
            )
            .unwrap();
        assert_eq!(updated, 3);

        let seen = backend.seen.lock().unwrap();
        assert_eq!(seen[0].0, "query");
        assert_eq!(seen[0].1, FieldMap::new().with("done", false));
        assert_eq!(seen[1].0, "update");
        assert_eq!(seen[1].1, FieldMap::new().with("title", "ship"));
        assert!(seen[1].2.is_empty());
    }

    #[test]
    fn test_add_one_forwards_entity() {
        let backend = Arc::new(RecordingBackend::default());
        let repo = task_repo(backend.clone());
        repo.add_one(Task {
            id: "t1".into(),
            title: "write".into(),
            done: true,
        })
        .unwrap();

        let seen = backend.seen.lock().unwrap();
        assert_eq!(seen[0].1.get("t1"), Some(&Field::Boolean(true)));
    }

    #[test]
    fn test_backend_error_propagates() {
        let repo = task_repo(Arc::new(RecordingBackend::default()));
        let err = repo.delete(&TaskFilter::default()).unwrap_err();
        assert_eq!(err, CoreError::Backend("delete unsupported".into()));
    }

    #[test]
    fn test_with_middleware_leaves_receiver() {
        struct Passthrough;
        impl Middleware<Task> for Passthrough {}

        let base = task_repo(Arc::new(RecordingBackend::default()));
        let one = base.with_middleware(Passthrough);
        let two = one.with_middleware(Passthrough);

        assert_eq!(base.middleware_count(), 0);
        assert_eq!(one.middleware_count(), 1);
        assert_eq!(two.middleware_count(), 2);
        assert_eq!(two.fields(), base.fields());
    }

    #[test]
    fn test_usable_through_protocol() {
        fn count_open(repo: &dyn RepositoryOps<Task, TaskFilter, TaskUpdate>) -> usize {
            repo.query(&TaskFilter { done: Some(false) }, None).unwrap().len()
        }

        let repo = task_repo(Arc::new(RecordingBackend::default()));
        assert_eq!(count_open(&repo), 0);
    }
}
