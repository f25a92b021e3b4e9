//! Path resolution for timecraft configuration.
//!
//! timecraft keeps its settings in `~/.timecraft/config.yaml`.

use std::path::{Path, PathBuf};

use crate::error::TimeCraftError;

/// Paths to timecraft's configuration directory and file.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.timecraft/`
    pub root: PathBuf,
    /// Config file: `~/.timecraft/config.yaml`
    pub config_file: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, TimeCraftError> {
        let home = std::env::var("HOME").map_err(|_| {
            TimeCraftError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".timecraft")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            root,
        }
    }

    /// Paths for a config file at an explicit location; its directory is
    /// the root.
    #[must_use]
    pub fn for_config_file(config_file: &Path) -> Self {
        let root = config_file
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);

        Self {
            root,
            config_file: config_file.to_path_buf(),
        }
    }

    /// Ensure the root directory exists, creating it if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), TimeCraftError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                TimeCraftError::Config(format!(
                    "Failed to create directory {}: {e}",
                    self.root.display()
                ))
            })?;
        }

        Ok(())
    }
}
