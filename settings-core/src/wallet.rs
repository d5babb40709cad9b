use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config_store::SettingsConfig;

const SHORT_ADDRESS_LEN: usize = 10;

/// Opaque account identity forwarded through restart and selection events.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Wallet {
    pub id: Uuid,
    pub address: String,
}

impl Wallet {
    /// The id is derived from the address, so the same account always maps to the same id.
    pub fn new(address: impl Into<String>) -> Self {
        let address = address.into();
        let id = Uuid::new_v5(&Uuid::NAMESPACE_OID, address.to_ascii_lowercase().as_bytes());
        Self { id, address }
    }

    /// Truncated address shown on the wallets row.
    pub fn short_address(&self) -> String {
        let prefix: String = self.address.chars().take(SHORT_ADDRESS_LEN).collect();
        format!("{}...", prefix)
    }
}

/// Active account plus the configuration it runs under. Owned by the shell.
#[derive(Debug, Clone, PartialEq)]
pub struct WalletSession {
    pub account: Wallet,
    pub config: SettingsConfig,
}

impl WalletSession {
    pub fn new(account: Wallet, config: SettingsConfig) -> Self {
        Self { account, config }
    }
}
