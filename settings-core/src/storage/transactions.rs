use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::SettingsResult;
use crate::storage::SettingsPaths;
use crate::wallet::Wallet;

/// Local transaction history cache cleared when an account is removed.
pub trait TransactionsStorage: Send + Sync {
    /// Drop every cached record. Idempotent; failures stay inside the implementation.
    fn delete_all(&self);
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CachedTransaction {
    pub hash: String,
    pub from: String,
    pub to: String,
    pub value: String,
    pub block_number: u64,
    pub chain_id: u64,
}

/// File-backed cache keeping one JSON document per wallet.
#[derive(Debug, Clone)]
pub struct FileTransactionsStorage {
    paths: SettingsPaths,
}

impl FileTransactionsStorage {
    pub fn new(paths: SettingsPaths) -> Self {
        Self { paths }
    }

    pub fn save(&self, wallet: &Wallet, records: &[CachedTransaction]) -> SettingsResult<()> {
        fs::create_dir_all(self.paths.transactions_dir())?;
        let serialized = serde_json::to_vec(records)?;
        fs::write(self.paths.transactions_file(&wallet.id), serialized)?;
        Ok(())
    }

    pub fn load(&self, wallet: &Wallet) -> SettingsResult<Vec<CachedTransaction>> {
        let path = self.paths.transactions_file(&wallet.id);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let bytes = fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn cached_files(&self) -> SettingsResult<Vec<PathBuf>> {
        let dir = self.paths.transactions_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut files = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let is_cache = path
                .extension()
                .map(|ext| ext == SettingsPaths::TRANSACTIONS_EXTENSION)
                .unwrap_or(false);
            if path.is_file() && is_cache {
                files.push(path);
            }
        }
        Ok(files)
    }
}

impl TransactionsStorage for FileTransactionsStorage {
    fn delete_all(&self) {
        let files = match self.cached_files() {
            Ok(files) => files,
            Err(err) => {
                log::warn!("Unable to list cached transactions: {}", err);
                return;
            }
        };

        let mut removed = 0usize;
        for path in files {
            match fs::remove_file(&path) {
                Ok(()) => removed += 1,
                Err(err) => log::warn!("Failed to remove {}: {}", path.display(), err),
            }
        }
        log::info!("Cleared {} cached transaction file(s)", removed);
    }
}
