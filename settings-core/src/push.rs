use std::sync::atomic::{AtomicU64, Ordering};

use blake3::Hasher;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registration endpoint for remote notifications.
pub trait PushNotificationsRegistrar: Send + Sync {
    /// Register (or re-register with current preferences). Idempotent.
    fn register(&self);
    /// Drop the registration. Idempotent.
    fn unregister(&self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPreferences {
    pub transactions: bool,
    pub price_alerts: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            transactions: true,
            price_alerts: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushStatus {
    pub enabled: bool,
    pub registration_id: Option<String>,
    pub preferences: NotificationPreferences,
}

#[derive(Debug, Clone)]
struct Registration {
    token_hash: [u8; 32],
    registration_id: Uuid,
    preferences: NotificationPreferences,
    sequence: u64,
}

#[derive(Debug, Default)]
struct RegistryState {
    device_token: Option<String>,
    preferences: NotificationPreferences,
    registration: Option<Registration>,
}

/// In-process registrar tracking the device token and the last pushed preferences.
#[derive(Debug, Default)]
pub struct PushRegistry {
    state: Mutex<RegistryState>,
    sequence: AtomicU64,
}

impl PushRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_device_token(&self, token: impl Into<String>) {
        let token = token.into();
        let mut state = self.state.lock();
        state.device_token = Some(token.trim().to_string()).filter(|t| !t.is_empty());
    }

    pub fn set_preferences(&self, preferences: NotificationPreferences) {
        self.state.lock().preferences = preferences;
    }

    pub fn status(&self) -> PushStatus {
        let state = self.state.lock();
        PushStatus {
            enabled: state.registration.is_some(),
            registration_id: state
                .registration
                .as_ref()
                .map(|registration| registration.registration_id.to_string()),
            preferences: state
                .registration
                .as_ref()
                .map(|registration| registration.preferences)
                .unwrap_or(state.preferences),
        }
    }

    /// Number of register calls that reached the registry.
    pub fn registrations_sent(&self) -> u64 {
        self.sequence.load(Ordering::SeqCst)
    }
}

impl PushNotificationsRegistrar for PushRegistry {
    fn register(&self) {
        let mut state = self.state.lock();
        let Some(token) = state.device_token.clone() else {
            log::warn!("Push registration skipped: no device token");
            return;
        };

        let mut hasher = Hasher::new();
        hasher.update(token.as_bytes());
        let mut token_hash = [0u8; 32];
        token_hash.copy_from_slice(hasher.finalize().as_bytes());

        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst);
        let preferences = state.preferences;
        match state.registration.as_mut() {
            Some(existing) if existing.token_hash == token_hash => {
                existing.preferences = preferences;
                existing.sequence = sequence;
            }
            _ => {
                state.registration = Some(Registration {
                    token_hash,
                    registration_id: Uuid::new_v4(),
                    preferences,
                    sequence,
                });
            }
        }
        log::info!(
            "Registered device {} for push notifications",
            &hex::encode(token_hash)[..12]
        );
    }

    fn unregister(&self) {
        let mut state = self.state.lock();
        if state.registration.take().is_some() {
            log::info!("Unregistered device from push notifications");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_without_token_is_swallowed() {
        let registry = PushRegistry::new();
        registry.register();
        assert!(!registry.status().enabled);
        assert_eq!(registry.registrations_sent(), 0);
    }

    #[test]
    fn re_register_keeps_id_and_refreshes_preferences() {
        let registry = PushRegistry::new();
        registry.set_device_token("device-token-123");
        registry.register();
        let first = registry.status();
        assert!(first.enabled);
        assert!(first.preferences.transactions);

        registry.set_preferences(NotificationPreferences {
            transactions: false,
            price_alerts: true,
        });
        registry.register();
        let second = registry.status();
        assert_eq!(first.registration_id, second.registration_id);
        assert!(second.preferences.price_alerts);
        assert_eq!(registry.registrations_sent(), 2);
    }

    #[test]
    fn unregister_is_idempotent() {
        let registry = PushRegistry::new();
        registry.set_device_token("device-token-123");
        registry.register();
        registry.unregister();
        registry.unregister();
        let status = registry.status();
        assert!(!status.enabled);
        assert_eq!(status.registration_id, None);
    }
}
