//! Path management for finvault
//!
//! Resolves the platform-appropriate data directory for encrypted records.
//!
//! ## Path Resolution Order
//!
//! 1. `FINVAULT_DATA_DIR` environment variable (if set)
//! 2. The platform data directory (`~/.local/share/finvault` on Linux,
//!    `~/Library/Application Support/finvault` on macOS, `%APPDATA%` on
//!    Windows)

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::{VaultError, VaultResult};

/// Manages all paths used by finvault
#[derive(Debug, Clone)]
pub struct StoragePaths {
    /// Base directory for all finvault data
    base_dir: PathBuf,
}

impl StoragePaths {
    /// Create a new StoragePaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined for the
    /// current platform.
    pub fn new() -> VaultResult<Self> {
        let base_dir = if let Ok(custom) = std::env::var("FINVAULT_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            let dirs = ProjectDirs::from("", "", "finvault").ok_or_else(|| {
                VaultError::Configuration("could not determine a data directory".into())
            })?;
            dirs.data_dir().to_path_buf()
        };

        Ok(Self { base_dir })
    }

    /// Create StoragePaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the directory holding encrypted records
    pub fn records_dir(&self) -> PathBuf {
        self.base_dir.join("records")
    }

    /// Get the path to a named encrypted record
    pub fn record_file(&self, name: &str) -> PathBuf {
        self.records_dir().join(format!("{}.json", name))
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> VaultResult<()> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| VaultError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.records_dir())
            .map_err(|e| VaultError::Io(format!("Failed to create records directory: {}", e)))?;

        Ok(())
    }
}
