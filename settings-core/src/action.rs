use serde::{Deserialize, Serialize};

use crate::currency::Currency;
use crate::network::RpcServer;

/// Change reported by the push notifications screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationChange {
    State(bool),
    PreferencesChanged,
}

/// A single user intent forwarded from the settings screen to the coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettingsAction {
    SwitchNetwork(RpcServer),
    ChangeCurrency(Currency),
    PushNotifications(NotificationChange),
}
