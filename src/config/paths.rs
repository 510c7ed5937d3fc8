//! Path management for cashplan
//!
//! ## Path Resolution Order
//!
//! 1. `CASHPLAN_CONFIG_DIR` environment variable (if set)
//! 2. The platform configuration directory reported by `directories`
//!    (`~/.config/cashplan` on Linux, `~/Library/Application Support/...`
//!    on macOS, `%APPDATA%\...` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::PlanError;

/// Environment variable that overrides the configuration directory
pub const CONFIG_DIR_ENV: &str = "CASHPLAN_CONFIG_DIR";

/// Manages all paths used by cashplan
#[derive(Debug, Clone)]
pub struct CashplanPaths {
    base_dir: PathBuf,
}

impl CashplanPaths {
    /// Resolve the configuration directory
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, PlanError> {
        let base_dir = match std::env::var(CONFIG_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths rooted at a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Default directory for CSV exports
    pub fn exports_dir(&self) -> PathBuf {
        self.base_dir.join("exports")
    }

    /// Ensure the base and export directories exist
    pub fn ensure_directories(&self) -> Result<(), PlanError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| PlanError::Io(format!("Failed to create config directory: {}", e)))?;

        std::fs::create_dir_all(self.exports_dir())
            .map_err(|e| PlanError::Io(format!("Failed to create exports directory: {}", e)))?;

        Ok(())
    }

    /// Check if a settings file has been written
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, PlanError> {
    ProjectDirs::from("", "", "cashplan")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| PlanError::Config("Could not determine a home directory".into()))
}
