//! Operation kinds
//!
//! The four operations every repository exposes and every middleware layer
//! may intercept.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Repository operation kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Add,
    Query,
    Update,
    Delete,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Add,
        Operation::Query,
        Operation::Update,
        Operation::Delete,
    ];

    /// Get operation name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Query => "query",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    /// Whether the operation changes stored records
    pub fn is_write(&self) -> bool {
        !matches!(self, Self::Query)
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Self::Add => 0,
            Self::Query => 1,
            Self::Update => 2,
            Self::Delete => 3,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
