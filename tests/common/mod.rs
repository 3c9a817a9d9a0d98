//! Shared fixtures for the integration tests

#![allow(dead_code)]

use repokit::record;

/// Route `tracing` output through the test harness. `RUST_LOG` selects the
/// level.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub id: String,
    pub name: String,
    pub age: i64,
}

#[derive(Debug, Clone, Default)]
pub struct PersonFilter {
    pub name: Option<String>,
    pub age: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct PersonUpdate {
    pub name: Option<String>,
    pub age: Option<i64>,
}

record!(Person { id, name, age });
record!(PersonFilter { name, age });
record!(PersonUpdate { name, age });

pub fn person(id: usize, name: &str, age: i64) -> Person {
    Person {
        id: format!("p{}", id),
        name: name.to_string(),
        age,
    }
}

pub fn by_age(age: i64) -> PersonFilter {
    PersonFilter {
        age: Some(age),
        ..PersonFilter::default()
    }
}
