//! Storage backends
//!
//! Implementations of [`Backend`](crate::core::Backend) shipped with the
//! crate.

pub mod in_memory;

pub use in_memory::InMemoryBackend;
