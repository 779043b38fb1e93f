//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ConfigValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Callback URL must be an http(s) URL")]
    InvalidCallbackUrl,

    #[error("Delivery attempt count must be at least 1")]
    InvalidAttemptCount,

    #[error("Turn limit must be at least 1")]
    InvalidTurnLimit,

    #[error("Category threshold must be between 1 and 5")]
    InvalidCategoryThreshold,

    #[error("API key must be set in production")]
    ApiKeyRequiredInProduction,
}
