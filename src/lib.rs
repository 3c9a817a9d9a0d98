//! repokit - a typed repository façade over interchangeable storage backends
//!
//! Application code declares an entity shape, a filter shape and an update
//! shape. [`RepositoryFactory`] checks that the three agree, freezes the
//! entity's field list and hands back a [`Repository`] exposing
//! add/query/update/delete. Every call runs through an ordered chain of
//! [`Middleware`] layers before it reaches the [`Backend`].
//!
//! ```ignore
//! use std::sync::Arc;
//! use repokit::{record, InMemoryBackend, Repository, RepositoryFactory};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Person { id: String, name: String, age: i64 }
//!
//! #[derive(Debug, Clone, Default)]
//! struct PersonFilter { name: Option<String>, age: Option<i64> }
//!
//! #[derive(Debug, Clone, Default)]
//! struct PersonUpdate { name: Option<String> }
//!
//! record!(Person { id, name, age });
//! record!(PersonFilter { name, age });
//! record!(PersonUpdate { name });
//!
//! let repo: Repository<Person, PersonFilter, PersonUpdate> =
//!     RepositoryFactory::create_repository(Arc::new(InMemoryBackend::new()))?;
//! ```

pub mod backends;
pub mod core;
pub mod field;
pub mod schema;

pub use crate::backends::InMemoryBackend;
pub use crate::core::{
    Backend, ConfigError, CoreError, CoreResult, FieldProjector, Middleware, Next,
    ObserveConfig, ObserveMiddleware, ObserveSnapshot, Operation, ReadOnlyMiddleware,
    Repository, RepositoryFactory, RepositoryOps,
};
pub use crate::field::{Field, FieldError, FieldKind, FieldMap, FieldValue};
pub use crate::schema::{
    FieldDescriptor, FieldList, FieldType, Incompatibility, Record, Schema, SchemaError,
    SchemaResult, SchemaRole, SchemaValidator,
};

/// Anything that can be stored through a [`Repository`].
///
/// Blanket-implemented for every [`Record`] that can be cloned and shared
/// across threads.
pub trait Entity: Record + Clone + Send + Sync + 'static {}

impl<T> Entity for T where T: Record + Clone + Send + Sync + 'static {}
