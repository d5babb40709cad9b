use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::errors::{SettingsError, SettingsResult};

/// Manages filesystem paths used by the settings backend.
#[derive(Debug, Clone)]
pub struct SettingsPaths {
    /// Root directory for settings data.
    root_dir: PathBuf,
    /// Path to persisted settings configuration.
    config_file: PathBuf,
    /// Directory holding per-wallet cached transaction history.
    transactions_dir: PathBuf,
}

impl SettingsPaths {
    /// Default configuration file name used on disk.
    pub const DEFAULT_CONFIG_FILENAME: &'static str = "settings.config";
    /// Extension of cached transaction files.
    pub const TRANSACTIONS_EXTENSION: &'static str = "json";

    /// Create a new path manager rooted at the provided directory.
    pub fn new(root: impl AsRef<Path>) -> SettingsResult<Self> {
        let root_dir = root.as_ref().to_path_buf();
        if root_dir.as_os_str().is_empty() {
            return Err(SettingsError::StorageError(
                "Settings root directory cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            config_file: root_dir.join(Self::DEFAULT_CONFIG_FILENAME),
            transactions_dir: root_dir.join("cache").join("transactions"),
            root_dir,
        })
    }

    /// Ensure the directory structure exists, creating missing folders.
    pub fn ensure_directories(&self) -> SettingsResult<()> {
        fs::create_dir_all(&self.root_dir)?;
        fs::create_dir_all(&self.transactions_dir)?;
        Ok(())
    }

    /// Path to persisted settings configuration file.
    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    /// Directory for cached transaction history.
    pub fn transactions_dir(&self) -> &Path {
        &self.transactions_dir
    }

    /// Cache file for a single wallet's transactions.
    pub fn transactions_file(&self, wallet_id: &Uuid) -> PathBuf {
        self.transactions_dir
            .join(format!("{}.{}", wallet_id, Self::TRANSACTIONS_EXTENSION))
    }

    /// Root directory for all settings-managed data.
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }
}
