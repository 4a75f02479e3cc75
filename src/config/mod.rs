//! Configuration - the TOML rule set a host or the CLI works from

mod export;
mod schema;

pub use export::{RuleSetExport, export_rules, import_rules, merge_imported_rules};
pub use schema::{Config, GeneralConfig};

use anyhow::{Context, Result};
use fs2::FileExt;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::rules::{ValidationResult, validate_rule};

impl Config {
    /// Parse the config file. A missing file yields the default config.
    ///
    /// Rules are not validated; see [`Config::load`].
    pub fn read(path: Option<&Path>) -> Result<Self> {
        let config_path = Self::resolve_path(path)?;
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))
    }

    /// Read the config and warn about every rule that would not match reliably
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = Self::read(path)?;
        config.warn_invalid_rules();
        Ok(config)
    }

    /// Validation results for the rules that fail, keyed by rule id, in file order
    pub fn invalid_rules(&self) -> Vec<(String, ValidationResult)> {
        self.rules
            .iter()
            .map(|rule| (rule.id.clone(), validate_rule(rule)))
            .filter(|(_, result)| !result.valid)
            .collect()
    }

    /// Log one warning per invalid rule; returns how many there were
    pub fn warn_invalid_rules(&self) -> usize {
        let invalid = self.invalid_rules();
        for (id, result) in &invalid {
            warn!("Rule '{}' is invalid: {}", id, result.errors.join("; "));
        }
        invalid.len()
    }

    /// Write the config, holding an exclusive lock on the file while it is rewritten
    pub fn save(&self, path: Option<&Path>) -> Result<()> {
        let config_path = Self::resolve_path(path)?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        // Truncate only once the lock is held
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&config_path)
            .with_context(|| format!("Failed to open config at {}", config_path.display()))?;
        file.lock_exclusive()
            .context("Failed to acquire config file lock")?;

        let result = file
            .set_len(0)
            .and_then(|()| file.write_all(content.as_bytes()))
            .and_then(|()| file.sync_all())
            .with_context(|| format!("Failed to write config to {}", config_path.display()));

        let _ = FileExt::unlock(&file);
        result
    }

    /// `path` if given, otherwise [`Config::default_path`]
    pub fn resolve_path(path: Option<&Path>) -> Result<PathBuf> {
        path.map(PathBuf::from)
            .or_else(Self::default_path)
            .context("Could not determine config path")
    }

    /// `<platform config dir>/foldertag/config.toml`, falling back to `~/.config`
    pub fn default_path() -> Option<PathBuf> {
        let config_base =
            dirs::config_dir().or_else(|| dirs::home_dir().map(|d| d.join(".config")))?;
        Some(config_base.join("foldertag").join("config.toml"))
    }
}
