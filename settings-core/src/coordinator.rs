//! Settings coordinator: routes screen actions, gates test-network switches
//! behind a confirmation prompt and relays account changes to the shell.
//!
//! ```text
//! Idle --SwitchNetwork(test, warning on)--> AwaitingConfirmation { server }
//! AwaitingConfirmation --Proceed | ProceedAndSuppress | Dismiss--> Idle
//! ```
//!
//! Every mutation of the session config completes before the events that
//! depend on it are returned.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::action::{NotificationChange, SettingsAction};
use crate::network::RpcServer;
use crate::push::PushNotificationsRegistrar;
use crate::storage::TransactionsStorage;
use crate::wallet::{Wallet, WalletSession};

/// How the user answered the test-network prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningResolution {
    /// Switch this time, keep warning next time.
    Proceed,
    /// Switch and never warn again.
    ProceedAndSuppress,
    /// Prompt closed without a choice.
    Dismiss,
}

/// Prompt the presentation layer must show before switching to a test network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkWarning {
    pub server: RpcServer,
}

impl NetworkWarning {
    /// The two affirmative choices, in display order. Dismissal is implicit.
    pub fn options(&self) -> [WarningResolution; 2] {
        [
            WarningResolution::ProceedAndSuppress,
            WarningResolution::Proceed,
        ]
    }
}

/// Notifications for the owning shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettingsEvent {
    ConfirmTestNetwork(NetworkWarning),
    /// Tear down and rebuild the session bound to `wallet`.
    Restart { wallet: Wallet },
    AccountsUpdated,
    DismissAccounts,
    /// The settings flow cannot continue (no wallets left).
    Cancelled,
}

/// Outcome reported by the accounts sub-flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountsEvent {
    Added(Wallet),
    Deleted {
        wallet: Wallet,
        remaining_wallets: usize,
    },
    Selected(Wallet),
    Cancelled,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CoordinatorState {
    #[default]
    Idle,
    AwaitingConfirmation {
        server: RpcServer,
    },
}

pub struct SettingsCoordinator {
    state: CoordinatorState,
    storage: Arc<dyn TransactionsStorage>,
    registrar: Arc<dyn PushNotificationsRegistrar>,
}

impl std::fmt::Debug for SettingsCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsCoordinator")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl SettingsCoordinator {
    pub fn new(
        storage: Arc<dyn TransactionsStorage>,
        registrar: Arc<dyn PushNotificationsRegistrar>,
    ) -> Self {
        Self {
            state: CoordinatorState::Idle,
            storage,
            registrar,
        }
    }

    pub fn state(&self) -> &CoordinatorState {
        &self.state
    }

    pub fn is_awaiting_confirmation(&self) -> bool {
        matches!(self.state, CoordinatorState::AwaitingConfirmation { .. })
    }

    /// Put back a previously captured state, used when a staged change is rolled back.
    pub(crate) fn restore_state(&mut self, state: CoordinatorState) {
        self.state = state;
    }

    pub fn dispatch(
        &mut self,
        session: &mut WalletSession,
        action: SettingsAction,
    ) -> Vec<SettingsEvent> {
        log::debug!("Dispatching settings action {:?}", action);
        match action {
            SettingsAction::SwitchNetwork(server) => self.prepare_switch_network(session, server),
            SettingsAction::ChangeCurrency(currency) => {
                session.config.currency = currency;
                vec![self.restart(&session.account)]
            }
            SettingsAction::PushNotifications(change) => {
                match change {
                    NotificationChange::State(true) => self.registrar.register(),
                    NotificationChange::State(false) => self.registrar.unregister(),
                    NotificationChange::PreferencesChanged => self.registrar.register(),
                }
                Vec::new()
            }
        }
    }

    /// Apply the user's answer to a pending test-network prompt. No-op when nothing is pending.
    pub fn resolve_network_warning(
        &mut self,
        session: &mut WalletSession,
        resolution: WarningResolution,
    ) -> Vec<SettingsEvent> {
        let server = match std::mem::take(&mut self.state) {
            CoordinatorState::AwaitingConfirmation { server } => server,
            CoordinatorState::Idle => {
                log::debug!("Ignoring {:?}: no network warning pending", resolution);
                return Vec::new();
            }
        };

        match resolution {
            WarningResolution::Dismiss => {
                log::debug!("Network switch to {} dismissed", server);
                Vec::new()
            }
            WarningResolution::Proceed => self.switch_network(session, &server),
            WarningResolution::ProceedAndSuppress => {
                session.config.test_network_warning_off = true;
                self.switch_network(session, &server)
            }
        }
    }

    pub fn handle_accounts(&mut self, event: AccountsEvent) -> Vec<SettingsEvent> {
        match event {
            AccountsEvent::Added(wallet) => {
                log::info!("Wallet {} added", wallet.short_address());
                vec![SettingsEvent::AccountsUpdated]
            }
            AccountsEvent::Deleted {
                wallet,
                remaining_wallets,
            } => {
                log::info!(
                    "Wallet {} deleted, {} remaining",
                    wallet.short_address(),
                    remaining_wallets
                );
                self.storage.delete_all();
                let mut events = vec![SettingsEvent::AccountsUpdated];
                if remaining_wallets == 0 {
                    events.push(SettingsEvent::DismissAccounts);
                    events.push(SettingsEvent::Cancelled);
                }
                events
            }
            AccountsEvent::Selected(wallet) => {
                self.state = CoordinatorState::Idle;
                vec![SettingsEvent::DismissAccounts, self.restart(&wallet)]
            }
            AccountsEvent::Cancelled => vec![SettingsEvent::DismissAccounts],
        }
    }

    pub fn restart(&self, wallet: &Wallet) -> SettingsEvent {
        log::info!("Restarting session for wallet {}", wallet.short_address());
        SettingsEvent::Restart {
            wallet: wallet.clone(),
        }
    }

    fn prepare_switch_network(
        &mut self,
        session: &mut WalletSession,
        server: RpcServer,
    ) -> Vec<SettingsEvent> {
        if server.is_test_network() && !session.config.test_network_warning_off {
            log::debug!("Confirmation required before switching to {}", server);
            self.state = CoordinatorState::AwaitingConfirmation {
                server: server.clone(),
            };
            return vec![SettingsEvent::ConfirmTestNetwork(NetworkWarning { server })];
        }

        self.state = CoordinatorState::Idle;
        self.switch_network(session, &server)
    }

    fn switch_network(&self, session: &mut WalletSession, server: &RpcServer) -> Vec<SettingsEvent> {
        log::info!("Switching network to {}", server);
        session.config.chain_id = server.chain_id();
        vec![self.restart(&session.account)]
    }
}
