//! Shape schemas for repokit
//!
//! Every shape (entity, filter, update) declares its fields once, as a
//! descriptor table. The validator checks the three tables against each
//! other when a repository is built and freezes the entity's field list.
//!
//! # Design Principles
//!
//! - Descriptors are data, declared statically per shape
//! - Validation runs once, at construction
//! - The first violation aborts construction
//! - Field order is declaration order

mod errors;
mod types;
mod validator;

pub use errors::{Incompatibility, SchemaError, SchemaResult, SchemaRole};
pub use types::{declared_type, FieldDescriptor, FieldType, Record, Schema};
pub use validator::{FieldList, SchemaValidator};
