//! Final-report delivery configuration.

use serde::Deserialize;
use std::time::Duration;

use crate::adapters::RetrySchedule;

use super::error::ConfigValidationError;

/// Upper bound on configured attempts; the doubling backoff makes anything
/// beyond this operationally useless.
const MAX_CONFIGURABLE_ATTEMPTS: u32 = 10;

/// Where and how the final report is delivered.
#[derive(Debug, Clone, Deserialize)]
pub struct DeliveryConfig {
    /// Collector endpoint the report is POSTed to.
    #[serde(default = "default_callback_url")]
    pub callback_url: String,

    /// Total delivery attempts, including the first.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Backoff after the first failed attempt, seconds; doubles per failure.
    #[serde(default = "default_base_delay")]
    pub base_delay_secs: u64,

    /// Wall-clock budget per attempt, seconds.
    #[serde(default = "default_attempt_timeout")]
    pub attempt_timeout_secs: u64,
}

impl DeliveryConfig {
    /// The retry schedule these knobs describe.
    pub fn schedule(&self) -> RetrySchedule {
        RetrySchedule {
            max_attempts: self.max_attempts,
            base_delay: Duration::from_secs(self.base_delay_secs),
            attempt_timeout: Duration::from_secs(self.attempt_timeout_secs),
        }
    }

    /// Validate delivery configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !self.callback_url.starts_with("http://") && !self.callback_url.starts_with("https://") {
            return Err(ConfigValidationError::InvalidCallbackUrl);
        }
        if !(1..=MAX_CONFIGURABLE_ATTEMPTS).contains(&self.max_attempts) {
            return Err(ConfigValidationError::InvalidAttemptCount);
        }
        if self.attempt_timeout_secs == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            callback_url: default_callback_url(),
            max_attempts: default_max_attempts(),
            base_delay_secs: default_base_delay(),
            attempt_timeout_secs: default_attempt_timeout(),
        }
    }
}

fn default_callback_url() -> String {
    "https://hackathon.guvi.in/api/updateHoneyPotFinalResult".to_string()
}

fn default_max_attempts() -> u32 {
    3
}

fn default_base_delay() -> u64 {
    2
}

fn default_attempt_timeout() -> u64 {
    10
}
