use std::fmt;

use serde::{Deserialize, Serialize};

/// User-defined network entry persisted alongside the settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomNetwork {
    pub chain_id: u64,
    pub name: String,
    pub endpoint: String,
}

/// A selectable network, either from the built-in catalog or user-defined.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum RpcServer {
    #[default]
    Main,
    Classic,
    Poa,
    Callisto,
    Kovan,
    Ropsten,
    Rinkeby,
    Sokol,
    Custom(CustomNetwork),
}

/// Picker section a network is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NetworkSection {
    Production,
    Test,
    Custom,
}

impl NetworkSection {
    /// Header shown above the section; production networks have none.
    pub fn header(&self) -> Option<&'static str> {
        match self {
            NetworkSection::Production => None,
            NetworkSection::Test => Some("Test"),
            NetworkSection::Custom => Some("Custom"),
        }
    }
}

impl RpcServer {
    /// Built-in catalog in picker order.
    pub const BUILT_IN: [RpcServer; 8] = [
        RpcServer::Main,
        RpcServer::Classic,
        RpcServer::Poa,
        RpcServer::Callisto,
        RpcServer::Kovan,
        RpcServer::Ropsten,
        RpcServer::Rinkeby,
        RpcServer::Sokol,
    ];

    pub fn chain_id(&self) -> u64 {
        match self {
            RpcServer::Main => 1,
            RpcServer::Classic => 61,
            RpcServer::Poa => 99,
            RpcServer::Callisto => 820,
            RpcServer::Kovan => 42,
            RpcServer::Ropsten => 3,
            RpcServer::Rinkeby => 4,
            RpcServer::Sokol => 77,
            RpcServer::Custom(network) => network.chain_id,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            RpcServer::Main => "Ethereum",
            RpcServer::Classic => "Ethereum Classic",
            RpcServer::Poa => "POA Network",
            RpcServer::Callisto => "Callisto",
            RpcServer::Kovan => "Kovan",
            RpcServer::Ropsten => "Ropsten",
            RpcServer::Rinkeby => "Rinkeby",
            RpcServer::Sokol => "Sokol",
            RpcServer::Custom(network) => network.name.as_str(),
        }
    }

    /// Anything that is not a production chain, custom entries included.
    pub fn is_test_network(&self) -> bool {
        match self {
            RpcServer::Main | RpcServer::Classic | RpcServer::Poa | RpcServer::Callisto => false,
            RpcServer::Kovan
            | RpcServer::Ropsten
            | RpcServer::Rinkeby
            | RpcServer::Sokol
            | RpcServer::Custom(_) => true,
        }
    }

    pub fn section(&self) -> NetworkSection {
        match self {
            RpcServer::Custom(_) => NetworkSection::Custom,
            server if server.is_test_network() => NetworkSection::Test,
            _ => NetworkSection::Production,
        }
    }

    /// Resolve a chain id against the catalog and custom entries, falling back to main.
    pub fn from_chain_id(chain_id: u64, custom: &[CustomNetwork]) -> Self {
        if let Some(server) = Self::BUILT_IN
            .iter()
            .find(|server| server.chain_id() == chain_id)
        {
            return server.clone();
        }

        custom
            .iter()
            .find(|network| network.chain_id == chain_id)
            .cloned()
            .map(RpcServer::Custom)
            .unwrap_or(RpcServer::Main)
    }

    pub fn is_built_in(chain_id: u64) -> bool {
        Self::BUILT_IN
            .iter()
            .any(|server| server.chain_id() == chain_id)
    }
}

impl fmt::Display for RpcServer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({})", self.display_name(), self.chain_id())
    }
}

/// Connectivity shown next to the settings title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NetworkCondition {
    /// Node reachable; carries the latest known block.
    Good(u64),
    Bad,
}

impl NetworkCondition {
    pub fn from_chain_state(reachable: bool, latest_block: u64) -> Self {
        if reachable {
            NetworkCondition::Good(latest_block)
        } else {
            NetworkCondition::Bad
        }
    }
}

/// All selectable networks grouped by picker section, in display order.
pub fn grouped_servers(custom: &[CustomNetwork]) -> Vec<(NetworkSection, Vec<RpcServer>)> {
    let mut production = Vec::new();
    let mut test = Vec::new();
    for server in RpcServer::BUILT_IN.iter() {
        match server.section() {
            NetworkSection::Production => production.push(server.clone()),
            _ => test.push(server.clone()),
        }
    }
    let custom: Vec<RpcServer> = custom.iter().cloned().map(RpcServer::Custom).collect();

    [
        (NetworkSection::Production, production),
        (NetworkSection::Test, test),
        (NetworkSection::Custom, custom),
    ]
    .into_iter()
    .filter(|(_, servers)| !servers.is_empty())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_net() -> CustomNetwork {
        CustomNetwork {
            chain_id: 1337,
            name: "Local".to_string(),
            endpoint: "http://localhost:8545".to_string(),
        }
    }

    #[test]
    fn production_and_test_classification() {
        assert!(!RpcServer::Main.is_test_network());
        assert!(!RpcServer::Callisto.is_test_network());
        assert!(RpcServer::Ropsten.is_test_network());
        assert!(RpcServer::Custom(local_net()).is_test_network());
    }

    #[test]
    fn unknown_chain_id_falls_back_to_main() {
        assert_eq!(RpcServer::from_chain_id(424242, &[]), RpcServer::Main);
        assert_eq!(RpcServer::from_chain_id(4, &[]), RpcServer::Rinkeby);
        assert_eq!(
            RpcServer::from_chain_id(1337, &[local_net()]),
            RpcServer::Custom(local_net())
        );
    }

    #[test]
    fn chain_state_maps_to_condition() {
        assert_eq!(
            NetworkCondition::from_chain_state(true, 7_200_000),
            NetworkCondition::Good(7_200_000)
        );
        assert_eq!(
            NetworkCondition::from_chain_state(false, 7_200_000),
            NetworkCondition::Bad
        );
    }

    #[test]
    fn grouping_skips_empty_custom_section() {
        let groups = grouped_servers(&[]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, NetworkSection::Production);
        assert_eq!(groups[0].1.len(), 4);
        assert_eq!(groups[1].0.header(), Some("Test"));

        let groups = grouped_servers(&[local_net()]);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[2].1[0].display_name(), "Local");
    }
}
