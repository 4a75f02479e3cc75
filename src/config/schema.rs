//! Configuration schema

use crate::rules::Rule;
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub general: GeneralConfig,

    /// Mapping rules, in evaluation order
    #[serde(default, rename = "rule")]
    pub rules: Vec<Rule>,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl GeneralConfig {
    /// Filter directive for the log subscriber.
    ///
    /// An explicit `env_filter` wins, then `verbose`, then `log_level`.
    pub fn log_filter(&self, env_filter: Option<String>, verbose: bool) -> String {
        match env_filter {
            Some(filter) if !filter.trim().is_empty() => filter,
            _ if verbose => "debug".to_string(),
            _ => self.log_level.clone(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
