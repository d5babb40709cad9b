use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use blake3::Hasher as Blake3;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::currency::Currency;
use crate::errors::{SettingsError, SettingsResult};
use crate::network::{CustomNetwork, RpcServer};
use crate::storage::SettingsPaths;
use crate::validation::NetworkValidator;

const CONFIG_VERSION: u16 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SettingsConfig {
    pub chain_id: u64,
    pub test_network_warning_off: bool,
    pub currency: Currency,
    #[serde(default)]
    pub custom_networks: Vec<CustomNetwork>,
    pub environment: String,
    pub last_updated: DateTime<Utc>,
    pub version: u16,
}

impl SettingsConfig {
    pub fn new(environment: impl Into<String>) -> Self {
        Self {
            chain_id: RpcServer::Main.chain_id(),
            test_network_warning_off: false,
            currency: Currency::default(),
            custom_networks: Vec::new(),
            environment: environment.into(),
            last_updated: Utc::now(),
            version: CONFIG_VERSION,
        }
    }

    pub fn touch(&mut self) {
        self.last_updated = Utc::now();
    }

    /// Network the configured chain id resolves to.
    pub fn active_server(&self) -> RpcServer {
        RpcServer::from_chain_id(self.chain_id, &self.custom_networks)
    }

    pub fn add_custom_network(&mut self, network: CustomNetwork) -> SettingsResult<()> {
        NetworkValidator::default().validate_custom_network(&network, &self.custom_networks)?;
        self.custom_networks.push(network);
        Ok(())
    }

    /// Remove a custom entry. The active chain falls back to main when it was the one removed.
    pub fn remove_custom_network(&mut self, chain_id: u64) -> SettingsResult<CustomNetwork> {
        let index = self
            .custom_networks
            .iter()
            .position(|network| network.chain_id == chain_id)
            .ok_or_else(|| {
                SettingsError::NotFound(format!("Custom network {} not configured", chain_id))
            })?;
        let removed = self.custom_networks.remove(index);
        if self.chain_id == chain_id {
            self.chain_id = RpcServer::Main.chain_id();
        }
        Ok(removed)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigEnvelope {
    version: u16,
    checksum: [u8; 32],
    payload: SettingsConfig,
    modified_at_unix: i64,
}

/// Handles persistence of settings with integrity checks.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn from_paths(paths: &SettingsPaths) -> Self {
        Self {
            path: paths.config_file().to_path_buf(),
        }
    }

    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn load_or_default(&self, environment: impl Into<String>) -> SettingsResult<SettingsConfig> {
        if !self.path.exists() {
            let config = SettingsConfig::new(environment);
            self.save(&config)?;
            return Ok(config);
        }

        let bytes = fs::read(&self.path)?;
        let envelope: ConfigEnvelope = serde_json::from_slice(&bytes)?;
        if envelope.version != CONFIG_VERSION {
            return Err(SettingsError::ValidationError(format!(
                "Unsupported config version {}",
                envelope.version
            )));
        }

        if checksum(&envelope.payload)? != envelope.checksum {
            return Err(SettingsError::ValidationError(
                "Config integrity verification failed".to_string(),
            ));
        }

        Ok(envelope.payload)
    }

    pub fn save(&self, config: &SettingsConfig) -> SettingsResult<()> {
        let mut payload = config.clone();
        payload.touch();

        let envelope = ConfigEnvelope {
            version: CONFIG_VERSION,
            checksum: checksum(&payload)?,
            modified_at_unix: Utc::now().timestamp(),
            payload,
        };

        let serialized = serde_json::to_vec_pretty(&envelope)?;
        let tmp_path = self.path.with_extension("new");
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        {
            let mut file = File::create(&tmp_path)?;
            file.write_all(&serialized)?;
            file.sync_all()?;
        }
        fs::rename(tmp_path, &self.path)?;
        log::debug!("Persisted settings to {}", self.path.display());
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn checksum(config: &SettingsConfig) -> SettingsResult<[u8; 32]> {
    let encoded = serde_json::to_vec(config)?;
    let mut hasher = Blake3::new();
    hasher.update(&encoded);
    let mut output = [0u8; 32];
    output.copy_from_slice(hasher.finalize().as_bytes());
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sidechain() -> CustomNetwork {
        CustomNetwork {
            chain_id: 8995,
            name: "Staging".to_string(),
            endpoint: "https://rpc.staging.example".to_string(),
        }
    }

    #[test]
    fn save_and_load_config_round_trip() {
        let temp = TempDir::new().unwrap();
        let store = ConfigStore::new(temp.path().join("settings.config"));

        let mut config = SettingsConfig::new("development");
        config.chain_id = RpcServer::Kovan.chain_id();
        config.currency = Currency::Eur;
        config.test_network_warning_off = true;
        store.save(&config).unwrap();

        let loaded = store.load_or_default("development").unwrap();
        assert_eq!(loaded.active_server(), RpcServer::Kovan);
        assert_eq!(loaded.currency, Currency::Eur);
        assert!(loaded.test_network_warning_off);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let store = ConfigStore::new(temp.path().join("nested").join("settings.config"));

        let config = store.load_or_default("test").unwrap();
        assert_eq!(config.chain_id, 1);
        assert!(!config.test_network_warning_off);
        assert_eq!(config.currency, Currency::Usd);
        assert!(store.path().exists());
    }

    #[test]
    fn tampered_config_detected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.config");
        let store = ConfigStore::new(&path);
        store.save(&SettingsConfig::new("test")).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        let tampered = raw.replace("\"chain_id\": 1,", "\"chain_id\": 3,");
        assert_ne!(raw, tampered);
        fs::write(&path, tampered).unwrap();

        let result = store.load_or_default("test");
        assert!(matches!(result, Err(SettingsError::ValidationError(_))));
    }

    #[test]
    fn removing_active_custom_network_resets_chain() {
        let mut config = SettingsConfig::new("test");
        config.add_custom_network(sidechain()).unwrap();
        config.chain_id = 8995;
        assert_eq!(config.active_server(), RpcServer::Custom(sidechain()));

        config.remove_custom_network(8995).unwrap();
        assert_eq!(config.active_server(), RpcServer::Main);
        assert!(matches!(
            config.remove_custom_network(8995),
            Err(SettingsError::NotFound(_))
        ));
    }
}
