//! Authentication configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ConfigValidationError;
use super::server::Environment;

/// API key authentication configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared API key callers must present in the `x-api-key` header.
    /// Optional in development; required in production.
    #[serde(default)]
    pub api_key: Option<Secret<String>>,
}

impl AuthConfig {
    /// True when the given key matches the configured one. An unset key
    /// (development) accepts every caller.
    pub fn key_matches(&self, presented: &str) -> bool {
        match &self.api_key {
            Some(expected) => expected.expose_secret() == presented,
            None => true,
        }
    }

    /// True when callers must present a key at all.
    pub fn requires_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Validate authentication configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ConfigValidationError> {
        if *environment == Environment::Production {
            match &self.api_key {
                Some(key) if !key.expose_secret().is_empty() => {}
                _ => return Err(ConfigValidationError::ApiKeyRequiredInProduction),
            }
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { api_key: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_key_accepts_everyone() {
        let config = AuthConfig::default();
        assert!(config.key_matches("anything"));
        assert!(!config.requires_key());
    }

    #[test]
    fn set_key_must_match() {
        let config = AuthConfig {
            api_key: Some(Secret::new("top-secret".to_string())),
        };
        assert!(config.key_matches("top-secret"));
        assert!(!config.key_matches("wrong"));
    }

    #[test]
    fn production_requires_key() {
        let config = AuthConfig::default();
        assert!(config.validate(&Environment::Production).is_err());
        assert!(config.validate(&Environment::Development).is_ok());
    }
}
