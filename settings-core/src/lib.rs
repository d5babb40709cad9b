// lib.rs - Core library structure for the wallet settings backend

pub mod action;
pub mod app_state;
pub mod config_store;
pub mod coordinator;
pub mod currency;
pub mod errors;
pub mod links;
pub mod network;
pub mod push;
pub mod screen;
pub mod storage;
pub mod validation;
pub mod wallet;

// Re-export common types
pub use action::{NotificationChange, SettingsAction};
pub use app_state::{SettingsContext, SharedSettingsContext};
pub use config_store::{ConfigStore, SettingsConfig};
pub use coordinator::{
    AccountsEvent, CoordinatorState, NetworkWarning, SettingsCoordinator, SettingsEvent,
    WarningResolution,
};
pub use currency::{Currency, CurrencySection};
pub use errors::{SettingsError, SettingsResult};
pub use links::{LinkOpener, LinkProvider};
pub use network::{grouped_servers, CustomNetwork, NetworkCondition, NetworkSection, RpcServer};
pub use push::{NotificationPreferences, PushNotificationsRegistrar, PushRegistry, PushStatus};
pub use screen::{
    intent_for, Destination, FormEvent, FormIntent, PasscodeLock, ScreenRequest, SettingsScreen,
    SettingsSummary,
};
pub use storage::{CachedTransaction, FileTransactionsStorage, SettingsPaths, TransactionsStorage};
pub use validation::NetworkValidator;
pub use wallet::{Wallet, WalletSession};
