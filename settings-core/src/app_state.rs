use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use crate::action::SettingsAction;
use crate::config_store::{ConfigStore, SettingsConfig};
use crate::coordinator::{
    AccountsEvent, CoordinatorState, SettingsCoordinator, SettingsEvent, WarningResolution,
};
use crate::errors::{SettingsError, SettingsResult};
use crate::network::CustomNetwork;
use crate::push::PushNotificationsRegistrar;
use crate::storage::{FileTransactionsStorage, SettingsPaths, TransactionsStorage};
use crate::wallet::{Wallet, WalletSession};

pub const ENVIRONMENT_VAR: &str = "TRUST_SETTINGS_ENV";

/// Settings backend for one shell: persisted config, active session and coordinator.
#[derive(Debug)]
pub struct SettingsContext {
    paths: SettingsPaths,
    config_store: ConfigStore,
    session: WalletSession,
    coordinator: SettingsCoordinator,
    environment: String,
}

impl SettingsContext {
    pub fn initialize(
        root_dir: PathBuf,
        account: Wallet,
        registrar: Arc<dyn PushNotificationsRegistrar>,
    ) -> SettingsResult<Self> {
        let paths = SettingsPaths::new(&root_dir)?;
        let storage = Arc::new(FileTransactionsStorage::new(paths.clone()));
        Self::with_collaborators(paths, account, storage, registrar)
    }

    pub fn with_collaborators(
        paths: SettingsPaths,
        account: Wallet,
        storage: Arc<dyn TransactionsStorage>,
        registrar: Arc<dyn PushNotificationsRegistrar>,
    ) -> SettingsResult<Self> {
        let environment =
            std::env::var(ENVIRONMENT_VAR).unwrap_or_else(|_| "development".to_string());
        paths.ensure_directories()?;

        let config_store = ConfigStore::from_paths(&paths);
        let config = config_store.load_or_default(environment.clone())?;
        log::info!(
            "Settings loaded for {} on {}",
            account.short_address(),
            config.active_server()
        );

        Ok(Self {
            paths,
            config_store,
            session: WalletSession::new(account, config),
            coordinator: SettingsCoordinator::new(storage, registrar),
            environment,
        })
    }

    pub fn session(&self) -> &WalletSession {
        &self.session
    }

    pub fn config(&self) -> &SettingsConfig {
        &self.session.config
    }

    pub fn coordinator(&self) -> &SettingsCoordinator {
        &self.coordinator
    }

    pub fn paths(&self) -> &SettingsPaths {
        &self.paths
    }

    pub fn config_store(&self) -> &ConfigStore {
        &self.config_store
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn dispatch(&mut self, action: SettingsAction) -> SettingsResult<Vec<SettingsEvent>> {
        self.staged(|coordinator, session| coordinator.dispatch(session, action))
    }

    pub fn resolve_network_warning(
        &mut self,
        resolution: WarningResolution,
    ) -> SettingsResult<Vec<SettingsEvent>> {
        self.staged(|coordinator, session| coordinator.resolve_network_warning(session, resolution))
    }

    pub fn handle_accounts(&mut self, event: AccountsEvent) -> Vec<SettingsEvent> {
        self.coordinator.handle_accounts(event)
    }

    /// Rebuild the session for `wallet` from the persisted config, as the shell does on restart.
    /// Any prompt left open under the previous session is dropped.
    pub fn restart(&mut self, wallet: Wallet) -> SettingsResult<()> {
        let config = self.config_store.load_or_default(self.environment.clone())?;
        self.coordinator.restore_state(CoordinatorState::Idle);
        log::info!(
            "Session rebuilt for {} on {}",
            wallet.short_address(),
            config.active_server()
        );
        self.session = WalletSession::new(wallet, config);
        Ok(())
    }

    pub fn add_custom_network(&mut self, network: CustomNetwork) -> SettingsResult<()> {
        let mut config = self.session.config.clone();
        config.add_custom_network(network)?;
        self.config_store.save(&config)?;
        self.session.config = config;
        Ok(())
    }

    pub fn remove_custom_network(&mut self, chain_id: u64) -> SettingsResult<CustomNetwork> {
        let mut config = self.session.config.clone();
        let removed = config.remove_custom_network(chain_id)?;
        self.config_store.save(&config)?;
        self.session.config = config;
        Ok(removed)
    }

    /// Run `op` against a copy of the session; persist and commit only if the save succeeds.
    fn staged<F>(&mut self, op: F) -> SettingsResult<Vec<SettingsEvent>>
    where
        F: FnOnce(&mut SettingsCoordinator, &mut WalletSession) -> Vec<SettingsEvent>,
    {
        let previous_state = self.coordinator.state().clone();
        let mut staged = self.session.clone();
        let events = op(&mut self.coordinator, &mut staged);

        if staged.config != self.session.config {
            if let Err(err) = self.config_store.save(&staged.config) {
                log::warn!("Settings change rolled back: {}", err);
                self.coordinator.restore_state(previous_state);
                return Err(err);
            }
        }

        self.session = staged;
        Ok(events)
    }
}

/// Shared settings context handed to shells that access it from several places.
#[derive(Clone)]
pub struct SharedSettingsContext(pub Arc<RwLock<SettingsContext>>);

impl SharedSettingsContext {
    pub fn new(inner: SettingsContext) -> Self {
        Self(Arc::new(RwLock::new(inner)))
    }

    pub fn read<F, T>(&self, op: F) -> SettingsResult<T>
    where
        F: FnOnce(&SettingsContext) -> SettingsResult<T>,
    {
        let guard = self
            .0
            .read()
            .map_err(|_| SettingsError::Unknown("Poisoned settings context".into()))?;
        op(&guard)
    }

    pub fn write<F, T>(&self, op: F) -> SettingsResult<T>
    where
        F: FnOnce(&mut SettingsContext) -> SettingsResult<T>,
    {
        let mut guard = self
            .0
            .write()
            .map_err(|_| SettingsError::Unknown("Poisoned settings context".into()))?;
        op(&mut guard)
    }
}
