//! Filter service configuration.
//!
//! Loaded in layers, lowest priority first:
//! 1. Compiled defaults ([`FilterConfig::default`])
//! 2. A JSON file (missing fields keep their defaults)
//! 3. `SOURCED_FILTERS_*` environment variables

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Environment override for [`FilterConfig::max_items`].
pub const ENV_MAX_ITEMS: &str = "SOURCED_FILTERS_MAX_ITEMS";
/// Environment override for [`FilterConfig::event_type`].
pub const ENV_EVENT_TYPE: &str = "SOURCED_FILTERS_EVENT_TYPE";

/// Limits and naming for filters and their change notifications.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Upper bound on the number of items a single filter may hold.
    pub max_items: usize,
    /// Upper bound on the length of a filter id.
    pub max_id_length: usize,
    /// Event type used when publishing filter changes to a bus.
    pub event_type: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            max_items: 10_000,
            max_id_length: 64,
            event_type: "filter.changed".to_string(),
        }
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid value for {name}: {value}")]
    InvalidEnv { name: &'static str, value: String },
}

impl FilterConfig {
    /// Parse a (possibly partial) JSON document over the defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let mut config: FilterConfig = serde_json::from_str(json)?;
        config.validate();
        Ok(config)
    }

    /// Load from `path`, falling back to defaults when the file is absent,
    /// then apply environment overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            serde_json::from_str(&contents)?
        } else {
            tracing::debug!(?path, "config file not found, using defaults");
            FilterConfig::default()
        };
        config.apply_env_with(|name| std::env::var(name).ok())?;
        config.validate();
        Ok(config)
    }

    /// Apply overrides from an environment lookup.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_MAX_ITEMS) {
            self.max_items = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                name: ENV_MAX_ITEMS,
                value: value.clone(),
            })?;
        }
        if let Some(value) = lookup(ENV_EVENT_TYPE) {
            if value.is_empty() {
                return Err(ConfigError::InvalidEnv {
                    name: ENV_EVENT_TYPE,
                    value,
                });
            }
            self.event_type = value;
        }
        Ok(())
    }

    /// Correct out-of-range values in place.
    pub fn validate(&mut self) {
        if self.max_items == 0 {
            tracing::warn!("max_items must be at least 1, using 1");
            self.max_items = 1;
        }
        if self.max_id_length == 0 {
            tracing::warn!("max_id_length must be at least 1, using default");
            self.max_id_length = FilterConfig::default().max_id_length;
        }
    }
}
