//! Engine configuration.
//!
//! # Responsibility
//! - Hold the few tunables of the engine with working defaults.
//! - Parse and validate overrides supplied as JSON.
//!
//! # Invariants
//! - A validated config always has `min_query_chars >= 1` and
//!   `label_max_chars >= 1`.

use crate::search::directory::DEFAULT_MIN_QUERY_CHARS;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

pub const DEFAULT_FALLBACK_DELAY_MS: u64 = 2_000;
pub const DEFAULT_LABEL_MAX_CHARS: usize = 50;

/// Configuration parse/validation error.
#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid config json: {err}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Engine tunables. Missing keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct EngineConfig {
    /// Search queries shorter than this return no results.
    pub min_query_chars: usize,
    /// Delay before the fallback dataset replaces a failed load.
    pub fallback_delay_ms: u64,
    /// Objective labels longer than this are truncated.
    pub label_max_chars: usize,
    /// When `false`, a failed load ends in an empty dataset instead of the
    /// built-in sample.
    pub use_fallback_dataset: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_query_chars: DEFAULT_MIN_QUERY_CHARS,
            fallback_delay_ms: DEFAULT_FALLBACK_DELAY_MS,
            label_max_chars: DEFAULT_LABEL_MAX_CHARS,
            use_fallback_dataset: true,
        }
    }
}

impl EngineConfig {
    /// Parses a JSON object of overrides and validates the result.
    ///
    /// # Errors
    /// - `Parse` for malformed JSON or unknown keys.
    /// - `Invalid` when a validated bound is violated.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_query_chars == 0 {
            return Err(ConfigError::Invalid(
                "minQueryChars must be at least 1".to_string(),
            ));
        }
        if self.label_max_chars == 0 {
            return Err(ConfigError::Invalid(
                "labelMaxChars must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn fallback_delay(&self) -> Duration {
        Duration::from_millis(self.fallback_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, EngineConfig};
    use std::time::Duration;

    #[test]
    fn empty_object_keeps_defaults() {
        let config = EngineConfig::from_json_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.fallback_delay(), Duration::from_secs(2));
    }

    #[test]
    fn overrides_are_applied() {
        let config =
            EngineConfig::from_json_str(r#"{"minQueryChars":3,"useFallbackDataset":false}"#)
                .unwrap();
        assert_eq!(config.min_query_chars, 3);
        assert!(!config.use_fallback_dataset);
        assert_eq!(config.label_max_chars, 50);
    }

    #[test]
    fn zero_threshold_is_rejected() {
        let err = EngineConfig::from_json_str(r#"{"minQueryChars":0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = EngineConfig::from_json_str(r#"{"minChars":3}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
