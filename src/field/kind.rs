//! Field kind registry
//!
//! Supported kinds:
//! - integer: 64-bit signed integer
//! - real: 64-bit floating point
//! - boolean
//! - text: UTF-8 string
//! - timestamp: UTC instant

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The primitive kinds a shape field may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Integer,
    Real,
    Boolean,
    Text,
    Timestamp,
}

impl FieldKind {
    /// Every registered kind, in declaration order
    pub const ALL: [FieldKind; 5] = [
        FieldKind::Integer,
        FieldKind::Real,
        FieldKind::Boolean,
        FieldKind::Text,
        FieldKind::Timestamp,
    ];

    /// Canonical name used in type strings and error messages
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Integer => "integer",
            FieldKind::Real => "real",
            FieldKind::Boolean => "boolean",
            FieldKind::Text => "text",
            FieldKind::Timestamp => "timestamp",
        }
    }

    /// Looks a kind up by its canonical name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FieldKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| format!("unknown field kind '{}'", s))
    }
}
