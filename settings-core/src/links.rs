use serde::{Deserialize, Serialize};

/// Opens URLs on behalf of the settings screen.
pub trait LinkOpener: Send + Sync {
    fn can_open(&self, url: &str) -> bool;
    fn open(&self, url: &str);
}

/// Community channels listed under "Join Community".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkProvider {
    Twitter,
    Telegram,
    Facebook,
    Discord,
}

impl LinkProvider {
    pub const ALL: [LinkProvider; 4] = [
        LinkProvider::Twitter,
        LinkProvider::Telegram,
        LinkProvider::Facebook,
        LinkProvider::Discord,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            LinkProvider::Twitter => "Twitter",
            LinkProvider::Telegram => "Telegram Group",
            LinkProvider::Facebook => "Facebook",
            LinkProvider::Discord => "Discord",
        }
    }

    /// Deep link into the provider's native app, when it has one.
    pub fn local_url(&self) -> Option<&'static str> {
        match self {
            LinkProvider::Twitter => Some("twitter://user?screen_name=trustwalletapp"),
            LinkProvider::Telegram => Some("tg://resolve?domain=trustwallet"),
            LinkProvider::Facebook => Some("fb://profile?id=trustwalletapp"),
            LinkProvider::Discord => None,
        }
    }

    pub fn remote_url(&self) -> &'static str {
        match self {
            LinkProvider::Twitter => "https://twitter.com/trustwalletapp",
            LinkProvider::Telegram => "https://t.me/trustwallet",
            LinkProvider::Facebook => "https://www.facebook.com/trustwalletapp",
            LinkProvider::Discord => "https://discord.gg/trustwallet",
        }
    }

    /// Open the app link when the opener can handle it, the web link otherwise.
    /// Returns the URL that was opened.
    pub fn open_with(&self, opener: &dyn LinkOpener) -> &'static str {
        let url = match self.local_url() {
            Some(local) if opener.can_open(local) => local,
            _ => self.remote_url(),
        };
        opener.open(url);
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    struct FakeOpener {
        installed: Vec<&'static str>,
        opened: Mutex<Vec<String>>,
    }

    impl LinkOpener for FakeOpener {
        fn can_open(&self, url: &str) -> bool {
            self.installed.iter().any(|scheme| url.starts_with(scheme))
        }

        fn open(&self, url: &str) {
            self.opened.lock().push(url.to_string());
        }
    }

    #[test]
    fn prefers_app_link_when_available() {
        let opener = FakeOpener {
            installed: vec!["tg://"],
            opened: Mutex::new(Vec::new()),
        };
        assert_eq!(
            LinkProvider::Telegram.open_with(&opener),
            "tg://resolve?domain=trustwallet"
        );
        assert_eq!(
            LinkProvider::Twitter.open_with(&opener),
            "https://twitter.com/trustwalletapp"
        );
        assert_eq!(
            LinkProvider::Discord.open_with(&opener),
            LinkProvider::Discord.remote_url()
        );
        assert_eq!(opener.opened.lock().len(), 3);
    }
}
