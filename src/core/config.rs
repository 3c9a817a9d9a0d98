//! Observe middleware configuration
//!
//! Read once when the layer is built and immutable afterwards.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default slow-call threshold in milliseconds
pub const DEFAULT_SLOW_CALL_THRESHOLD_MS: u64 = 100;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    /// Get error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "REPO_CONFIG_IO",
            Self::Parse(_) => "REPO_CONFIG_PARSE",
        }
    }
}

/// Settings for [`ObserveMiddleware`](crate::core::middleware::observe::ObserveMiddleware)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObserveConfig {
    /// Emit log events; counters are kept either way
    pub enabled: bool,

    /// Calls taking at least this long are logged at info
    pub slow_call_threshold_ms: u64,

    /// Include filter and update contents in debug events
    pub log_arguments: bool,
}

impl Default for ObserveConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            slow_call_threshold_ms: DEFAULT_SLOW_CALL_THRESHOLD_MS,
            log_arguments: false,
        }
    }
}

impl ObserveConfig {
    /// Logging on, default threshold
    pub fn enabled() -> Self {
        Self::default()
    }

    /// Counting only
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Set the slow-call threshold
    pub fn with_slow_call_threshold_ms(mut self, threshold_ms: u64) -> Self {
        self.slow_call_threshold_ms = threshold_ms;
        self
    }

    /// Parse from a JSON document. Missing keys take their defaults.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ObserveConfig::default();
        assert!(config.enabled);
        assert_eq!(config.slow_call_threshold_ms, 100);
        assert!(!config.log_arguments);
        assert!(!ObserveConfig::disabled().enabled);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = ObserveConfig::from_json_str(r#"{"slow_call_threshold_ms": 5}"#).unwrap();
        assert_eq!(config, ObserveConfig::default().with_slow_call_threshold_ms(5));
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        let err = ObserveConfig::from_json_str("{ enabled: ").unwrap_err();
        assert_eq!(err.code(), "REPO_CONFIG_PARSE");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"enabled": false, "log_arguments": true}}"#).unwrap();

        let config = ObserveConfig::load(file.path()).unwrap();
        assert!(!config.enabled);
        assert!(config.log_arguments);
        assert_eq!(config.slow_call_threshold_ms, DEFAULT_SLOW_CALL_THRESHOLD_MS);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ObserveConfig::load(dir.path().join("absent.json")).unwrap_err();
        assert_eq!(err.code(), "REPO_CONFIG_IO");
        assert!(err.to_string().contains("absent.json"));
    }
}
