use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{SettingsError, SettingsResult};
use crate::network::{CustomNetwork, RpcServer};

static ENDPOINT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://[A-Za-z0-9.-]+(:\d{1,5})?(/\S*)?$").expect("endpoint regex is valid")
});

static MALICIOUS_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [r"(?i)<script", r"(?i)javascript:", r"(?i)data:text/html", r"(?i)onerror="]
        .iter()
        .map(|pattern| Regex::new(pattern).expect("blacklist regex is valid"))
        .collect()
});

/// Checks user-supplied custom network entries before they reach the config.
#[derive(Debug, Clone)]
pub struct NetworkValidator {
    max_name_length: usize,
    max_endpoint_length: usize,
}

impl Default for NetworkValidator {
    fn default() -> Self {
        Self {
            max_name_length: 64,
            max_endpoint_length: 256,
        }
    }
}

impl NetworkValidator {
    pub fn validate_name(&self, name: &str) -> SettingsResult<()> {
        check_basic_security(name)?;
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(SettingsError::ValidationError(
                "Network name cannot be empty".to_string(),
            ));
        }
        if trimmed.chars().count() > self.max_name_length {
            return Err(SettingsError::ValidationError(format!(
                "Network name exceeds {} characters",
                self.max_name_length
            )));
        }
        Ok(())
    }

    pub fn validate_endpoint(&self, endpoint: &str) -> SettingsResult<()> {
        check_basic_security(endpoint)?;
        if endpoint.len() > self.max_endpoint_length {
            return Err(SettingsError::ValidationError("Endpoint too long".to_string()));
        }
        if !ENDPOINT_PATTERN.is_match(endpoint) {
            return Err(SettingsError::InvalidNetwork(format!(
                "Endpoint '{}' is not an http(s) URL",
                endpoint
            )));
        }
        Ok(())
    }

    pub fn validate_chain_id(&self, chain_id: u64, existing: &[CustomNetwork]) -> SettingsResult<()> {
        if chain_id == 0 {
            return Err(SettingsError::InvalidNetwork(
                "Chain id must be non-zero".to_string(),
            ));
        }
        if RpcServer::is_built_in(chain_id) {
            return Err(SettingsError::AlreadyExists(format!(
                "Chain id {} belongs to a built-in network",
                chain_id
            )));
        }
        if existing.iter().any(|network| network.chain_id == chain_id) {
            return Err(SettingsError::AlreadyExists(format!(
                "Custom network with chain id {} already configured",
                chain_id
            )));
        }
        Ok(())
    }

    pub fn validate_custom_network(
        &self,
        network: &CustomNetwork,
        existing: &[CustomNetwork],
    ) -> SettingsResult<()> {
        self.validate_name(&network.name)?;
        self.validate_endpoint(&network.endpoint)?;
        self.validate_chain_id(network.chain_id, existing)
    }
}

fn check_basic_security(input: &str) -> SettingsResult<()> {
    if MALICIOUS_PATTERNS.iter().any(|pattern| pattern.is_match(input)) {
        return Err(SettingsError::ValidationError(
            "Input contains potentially malicious content".to_string(),
        ));
    }
    if input.chars().any(|c| c.is_control()) {
        return Err(SettingsError::ValidationError(
            "Input contains control characters".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network(chain_id: u64, name: &str, endpoint: &str) -> CustomNetwork {
        CustomNetwork {
            chain_id,
            name: name.to_string(),
            endpoint: endpoint.to_string(),
        }
    }

    #[test]
    fn accepts_well_formed_entry() {
        let validator = NetworkValidator::default();
        let entry = network(1337, "Local", "http://127.0.0.1:8545");
        assert!(validator.validate_custom_network(&entry, &[]).is_ok());
    }

    #[test]
    fn rejects_catalog_and_duplicate_chain_ids() {
        let validator = NetworkValidator::default();
        let ropsten = network(3, "Mine", "https://rpc.example");
        assert!(matches!(
            validator.validate_custom_network(&ropsten, &[]),
            Err(SettingsError::AlreadyExists(_))
        ));

        let existing = vec![network(1337, "Local", "http://localhost:8545")];
        let duplicate = network(1337, "Other", "http://localhost:9545");
        assert!(matches!(
            validator.validate_custom_network(&duplicate, &existing),
            Err(SettingsError::AlreadyExists(_))
        ));
    }

    #[test]
    fn rejects_bad_names_and_endpoints() {
        let validator = NetworkValidator::default();
        assert!(validator.validate_name("   ").is_err());
        assert!(validator.validate_name(&"n".repeat(65)).is_err());
        assert!(validator.validate_name("<script>alert(1)").is_err());
        assert!(matches!(
            validator.validate_endpoint("ftp://rpc.example"),
            Err(SettingsError::InvalidNetwork(_))
        ));
        assert!(validator.validate_endpoint("javascript:alert(1)").is_err());
        assert!(validator.validate_chain_id(0, &[]).is_err());
    }
}
