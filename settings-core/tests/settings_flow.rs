use std::sync::Arc;

use tempfile::TempDir;
use trust_settings_lib::{
    AccountsEvent, CachedTransaction, FileTransactionsStorage, FormEvent, LinkOpener,
    NotificationChange, PasscodeLock, PushRegistry, RpcServer, ScreenRequest, SettingsAction,
    SettingsContext, SettingsEvent, SettingsPaths, SettingsResult, SettingsScreen, Wallet,
    WarningResolution,
};

struct NoPasscode;

impl PasscodeLock for NoPasscode {
    fn is_passcode_set(&self) -> bool {
        false
    }

    fn delete_passcode(&self) {}
}

struct WebOnly;

impl LinkOpener for WebOnly {
    fn can_open(&self, url: &str) -> bool {
        url.starts_with("https://")
    }

    fn open(&self, _url: &str) {}
}

fn record() -> CachedTransaction {
    CachedTransaction {
        hash: "0x01".to_string(),
        from: "0xaaa".to_string(),
        to: "0xbbb".to_string(),
        value: "5".to_string(),
        block_number: 7,
        chain_id: 1,
    }
}

#[test]
fn screen_to_coordinator_network_switch_flow() -> SettingsResult<()> {
    let temp_dir = TempDir::new().expect("create temp dir");
    let wallet = Wallet::new("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed");
    let registry = Arc::new(PushRegistry::new());
    registry.set_device_token("integration-device");
    let mut context =
        SettingsContext::initialize(temp_dir.path().to_path_buf(), wallet.clone(), registry.clone())?;
    let mut screen = SettingsScreen::new(Arc::new(NoPasscode), Arc::new(WebOnly));

    // Picking a test network asks first and leaves the chain alone.
    let Some(ScreenRequest::Dispatch(action)) =
        screen.handle(FormEvent::NetworkSelected(Some(RpcServer::Rinkeby)))
    else {
        panic!("network selection must dispatch an action");
    };
    let events = context.dispatch(action)?;
    assert!(matches!(events.as_slice(), [SettingsEvent::ConfirmTestNetwork(_)]));
    assert_eq!(context.config().chain_id, RpcServer::Main.chain_id());

    // Suppressing the warning switches and restarts with the same wallet.
    let events = context.resolve_network_warning(WarningResolution::ProceedAndSuppress)?;
    assert_eq!(
        events,
        vec![SettingsEvent::Restart {
            wallet: wallet.clone()
        }]
    );
    context.restart(wallet.clone())?;
    assert_eq!(context.config().active_server(), RpcServer::Rinkeby);
    assert!(context.config().test_network_warning_off);

    // With the warning off, the next test network switches immediately.
    let events = context.dispatch(SettingsAction::SwitchNetwork(RpcServer::Kovan))?;
    assert_eq!(events.len(), 1);
    assert!(!context.coordinator().is_awaiting_confirmation());

    // Notification toggles reach the registry.
    let Some(ScreenRequest::Dispatch(action)) = screen.handle(FormEvent::NotificationsChanged(
        NotificationChange::State(true),
    )) else {
        panic!("notification change must dispatch an action");
    };
    assert!(context.dispatch(action)?.is_empty());
    assert!(registry.status().enabled);

    Ok(())
}

#[test]
fn deleting_last_wallet_clears_history_and_cancels() -> SettingsResult<()> {
    let temp_dir = TempDir::new().expect("create temp dir");
    let paths = SettingsPaths::new(temp_dir.path())?;
    let storage = Arc::new(FileTransactionsStorage::new(paths.clone()));
    let wallet = Wallet::new("0x1111111111111111111111111111111111111111");
    storage.save(&wallet, &[record()])?;

    let mut context = SettingsContext::with_collaborators(
        paths,
        wallet.clone(),
        storage.clone(),
        Arc::new(PushRegistry::new()),
    )?;

    let events = context.handle_accounts(AccountsEvent::Deleted {
        wallet: wallet.clone(),
        remaining_wallets: 0,
    });
    assert!(storage.load(&wallet)?.is_empty());
    assert_eq!(events.first(), Some(&SettingsEvent::AccountsUpdated));
    assert_eq!(
        events
            .iter()
            .filter(|event| **event == SettingsEvent::Cancelled)
            .count(),
        1
    );
    Ok(())
}
