use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum SettingsError {
    // Storage errors
    StorageError(String),
    FileNotFound(String),
    PermissionDenied(String),

    // Validation errors
    ValidationError(String),
    InvalidNetwork(String),
    InvalidCurrency(String),

    // Application errors
    AlreadyExists(String),
    NotFound(String),

    // Generic errors
    Unknown(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SettingsError::StorageError(msg) => write!(f, "Storage error: {}", msg),
            SettingsError::FileNotFound(msg) => write!(f, "File not found: {}", msg),
            SettingsError::PermissionDenied(msg) => write!(f, "Permission denied: {}", msg),

            SettingsError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            SettingsError::InvalidNetwork(msg) => write!(f, "Invalid network: {}", msg),
            SettingsError::InvalidCurrency(msg) => write!(f, "Invalid currency: {}", msg),

            SettingsError::AlreadyExists(msg) => write!(f, "Already exists: {}", msg),
            SettingsError::NotFound(msg) => write!(f, "Not found: {}", msg),

            SettingsError::Unknown(msg) => write!(f, "Unknown error: {}", msg),
        }
    }
}

impl std::error::Error for SettingsError {}

pub type SettingsResult<T> = Result<T, SettingsError>;

impl From<std::io::Error> for SettingsError {
    fn from(error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::NotFound => SettingsError::FileNotFound(error.to_string()),
            std::io::ErrorKind::PermissionDenied => {
                SettingsError::PermissionDenied(error.to_string())
            }
            _ => SettingsError::StorageError(error.to_string()),
        }
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(error: serde_json::Error) -> Self {
        SettingsError::ValidationError(format!("JSON error: {}", error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_map_by_kind() {
        let missing = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(matches!(
            SettingsError::from(missing),
            SettingsError::FileNotFound(_)
        ));

        let other = std::io::Error::new(std::io::ErrorKind::Other, "disk");
        assert!(matches!(
            SettingsError::from(other),
            SettingsError::StorageError(_)
        ));
    }
}
