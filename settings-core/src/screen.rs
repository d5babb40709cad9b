//! Non-rendering half of the settings screen: turns form events into
//! coordinator actions or presentation requests.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::action::{NotificationChange, SettingsAction};
use crate::currency::Currency;
use crate::links::{LinkOpener, LinkProvider};
use crate::network::{NetworkCondition, RpcServer};
use crate::wallet::WalletSession;

/// Passcode storage owned by the lock subsystem.
pub trait PasscodeLock: Send + Sync {
    fn is_passcode_set(&self) -> bool;
    fn delete_passcode(&self);
}

/// Raw event from a settings row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    NetworkSelected(Option<RpcServer>),
    CurrencySelected(Option<Currency>),
    PasscodeToggled(bool),
    NotificationsChanged(NotificationChange),
    LinkSelected(LinkProvider),
    ShareSelected,
    RateUsSelected,
    SupportSelected,
    WalletsSelected,
}

/// Screens the shell presents on request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Destination {
    PasscodeCreation,
    Share,
    RateUs,
    Support,
    Wallets,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormIntent {
    Dispatch(SettingsAction),
    DeletePasscode,
    OpenLink(LinkProvider),
    Present(Destination),
    Ignore,
}

/// Map a row event to what should happen. Pure; performs no side effects.
pub fn intent_for(event: FormEvent) -> FormIntent {
    match event {
        FormEvent::NetworkSelected(server) => {
            FormIntent::Dispatch(SettingsAction::SwitchNetwork(server.unwrap_or_default()))
        }
        FormEvent::CurrencySelected(Some(currency)) => {
            FormIntent::Dispatch(SettingsAction::ChangeCurrency(currency))
        }
        FormEvent::CurrencySelected(None) => FormIntent::Ignore,
        FormEvent::PasscodeToggled(true) => FormIntent::Present(Destination::PasscodeCreation),
        FormEvent::PasscodeToggled(false) => FormIntent::DeletePasscode,
        FormEvent::NotificationsChanged(change) => {
            FormIntent::Dispatch(SettingsAction::PushNotifications(change))
        }
        FormEvent::LinkSelected(provider) => FormIntent::OpenLink(provider),
        FormEvent::ShareSelected => FormIntent::Present(Destination::Share),
        FormEvent::RateUsSelected => FormIntent::Present(Destination::RateUs),
        FormEvent::SupportSelected => FormIntent::Present(Destination::Support),
        FormEvent::WalletsSelected => FormIntent::Present(Destination::Wallets),
    }
}

/// What the shell has to do after the screen handled an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenRequest {
    Dispatch(SettingsAction),
    Present(Destination),
}

/// Values displayed by the settings rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsSummary {
    pub network: String,
    pub wallet: String,
    pub passcode_enabled: bool,
    pub currency: Currency,
    pub version: String,
    /// `None` until the first chain state update arrives.
    pub condition: Option<NetworkCondition>,
}

pub struct SettingsScreen {
    lock: Arc<dyn PasscodeLock>,
    opener: Arc<dyn LinkOpener>,
    passcode_enabled: bool,
    condition: Option<NetworkCondition>,
}

impl SettingsScreen {
    pub fn new(lock: Arc<dyn PasscodeLock>, opener: Arc<dyn LinkOpener>) -> Self {
        let passcode_enabled = lock.is_passcode_set();
        Self {
            lock,
            opener,
            passcode_enabled,
            condition: None,
        }
    }

    pub fn passcode_enabled(&self) -> bool {
        self.passcode_enabled
    }

    /// Handle a row event, running screen-local effects and returning what the shell must do.
    pub fn handle(&mut self, event: FormEvent) -> Option<ScreenRequest> {
        match intent_for(event) {
            FormIntent::Dispatch(action) => Some(ScreenRequest::Dispatch(action)),
            FormIntent::DeletePasscode => {
                self.lock.delete_passcode();
                self.passcode_enabled = false;
                None
            }
            FormIntent::OpenLink(provider) => {
                let url = provider.open_with(self.opener.as_ref());
                log::debug!("Opened {} link {}", provider.title(), url);
                None
            }
            FormIntent::Present(destination) => Some(ScreenRequest::Present(destination)),
            FormIntent::Ignore => None,
        }
    }

    /// Result of the passcode creation flow; a cancelled flow leaves the toggle off.
    pub fn passcode_created(&mut self, created: bool) {
        self.passcode_enabled = created;
    }

    /// Chain state update from the session's block poller.
    pub fn chain_state_changed(&mut self, reachable: bool, latest_block: u64) {
        self.condition = Some(NetworkCondition::from_chain_state(reachable, latest_block));
    }

    pub fn summary(&self, session: &WalletSession) -> SettingsSummary {
        SettingsSummary {
            network: session.config.active_server().display_name().to_string(),
            wallet: session.account.short_address(),
            passcode_enabled: self.passcode_enabled,
            currency: session.config.currency,
            version: env!("CARGO_PKG_VERSION").to_string(),
            condition: self.condition,
        }
    }
}
