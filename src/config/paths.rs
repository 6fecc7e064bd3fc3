//! Path management for tripsplit
//!
//! ## Path Resolution Order
//!
//! 1. `TRIPSPLIT_DATA_DIR` environment variable (if set)
//! 2. The platform config directory reported by `directories`
//!    (`~/.config/tripsplit` on Linux, `%APPDATA%\tripsplit\config` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::TripError;

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "TRIPSPLIT_DATA_DIR";

/// Manages all paths used by tripsplit
#[derive(Debug, Clone)]
pub struct TripPaths {
    base_dir: PathBuf,
}

impl TripPaths {
    /// Resolve paths from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, TripError> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => ProjectDirs::from("", "", "tripsplit")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    TripError::Config("Could not determine a home directory".into())
                })?,
        };

        Ok(Self { base_dir })
    }

    /// Create TripPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding the trip's JSON data files
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn members_file(&self) -> PathBuf {
        self.data_dir().join("members.json")
    }

    pub fn expenses_file(&self) -> PathBuf {
        self.data_dir().join("expenses.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), TripError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| TripError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| TripError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if a trip has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}
