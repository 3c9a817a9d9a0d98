//! # Repository Core
//!
//! The backend contract, the middleware chain and the typed façade that
//! ties them to validated shapes.
//!
//! ## Design Principles
//!
//! - Shapes are validated once, when the façade is built
//! - Every call crosses the backend boundary as field maps
//! - Middleware layers compose last-added first
//! - Errors from backends and layers reach the caller unchanged

pub mod backend;
pub mod config;
pub mod error;
pub mod middleware;
pub mod operation;
pub mod pipeline;
pub mod projector;
pub mod repository;

pub use backend::Backend;
pub use config::{ConfigError, ConfigResult, ObserveConfig};
pub use error::{CoreError, CoreResult};
pub use middleware::guard::ReadOnlyMiddleware;
pub use middleware::observe::{ObserveMiddleware, ObserveSnapshot};
pub use middleware::Middleware;
pub use operation::Operation;
pub use pipeline::Next;
pub use projector::FieldProjector;
pub use repository::{Repository, RepositoryFactory, RepositoryOps};
