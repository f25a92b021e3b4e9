//! Configuration settings for timecraft.
//!
//! Settings are loaded from `~/.timecraft/config.yaml`:
//!
//! ```yaml
//! scopes:
//!   default_field: created_at
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::Paths;
use crate::error::TimeCraftError;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Query scope settings.
    pub scopes: ScopeConfig,
}

/// Query scope settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScopeConfig {
    /// Column scopes filter on when neither the call nor the record type
    /// names one.
    #[serde(default = "default_field")]
    pub default_field: String,
}

fn default_field() -> String {
    "created_at".to_string()
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            default_field: default_field(),
        }
    }
}

impl ScopeConfig {
    /// Use `field` as the global default column.
    pub fn with_default_field(field: impl Into<String>) -> Self {
        Self {
            default_field: field.into(),
        }
    }
}

impl Config {
    /// Load configuration from the config file under `paths`.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from(paths: &Paths) -> Result<Self, TimeCraftError> {
        Self::load_from_path(&paths.config_file)
    }

    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &Path) -> Result<Self, TimeCraftError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            TimeCraftError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            TimeCraftError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Save configuration to the config file under `paths`, creating its
    /// directory first.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or the config file cannot be written.
    pub fn save_to(&self, paths: &Paths) -> Result<(), TimeCraftError> {
        paths.ensure_dirs()?;
        self.save_to_path(&paths.config_file)
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &Path) -> Result<(), TimeCraftError> {
        let contents = serde_yaml::to_string(self)
            .map_err(|e| TimeCraftError::Config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, contents).map_err(|e| {
            TimeCraftError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }
}
