//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values are read with the `SCAMBAIT_`
//! prefix and nested sections use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use scambait::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod auth;
mod delivery;
mod engagement;
mod error;
mod server;

pub use auth::AuthConfig;
pub use delivery::DeliveryConfig;
pub use engagement::EngagementConfig;
pub use error::{ConfigError, ConfigValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// API key authentication
    #[serde(default)]
    pub auth: AuthConfig,

    /// Engagement thresholds and capability budgets
    #[serde(default)]
    pub engagement: EngagementConfig,

    /// Final-report delivery
    #[serde(default)]
    pub delivery: DeliveryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with the `SCAMBAIT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `SCAMBAIT__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `SCAMBAIT__DELIVERY__CALLBACK_URL=...` -> `delivery.callback_url = ...`
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SCAMBAIT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.server.validate()?;
        self.auth.validate(&self.server.environment)?;
        self.engagement.validate()?;
        self.delivery.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
