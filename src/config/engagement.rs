//! Engagement configuration: termination thresholds and capability budgets.

use serde::Deserialize;
use std::time::Duration;

use crate::domain::session::TerminationPolicy;

use super::error::ConfigValidationError;

/// Engagement tuning knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct EngagementConfig {
    /// Hard cap on conversation turns per session.
    #[serde(default = "default_max_turns")]
    pub max_turns: u32,

    /// Distinct intelligence categories that end a session as sufficient.
    #[serde(default = "default_min_categories")]
    pub min_categories: usize,

    /// Turns without new intelligence before a session counts as stale.
    #[serde(default = "default_stale_turns")]
    pub stale_turns: u32,

    /// Per-call budget for classifier and responder capabilities, seconds.
    #[serde(default = "default_capability_timeout")]
    pub capability_timeout_secs: u64,
}

impl EngagementConfig {
    /// The termination policy these knobs describe.
    pub fn policy(&self) -> TerminationPolicy {
        TerminationPolicy {
            max_turns: self.max_turns,
            min_categories: self.min_categories,
            stale_turns: self.stale_turns,
        }
    }

    /// Capability budget as a Duration.
    pub fn capability_timeout(&self) -> Duration {
        Duration::from_secs(self.capability_timeout_secs)
    }

    /// Validate engagement configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.max_turns == 0 {
            return Err(ConfigValidationError::InvalidTurnLimit);
        }
        if self.min_categories == 0 || self.min_categories > 5 {
            return Err(ConfigValidationError::InvalidCategoryThreshold);
        }
        if self.capability_timeout_secs == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for EngagementConfig {
    fn default() -> Self {
        Self {
            max_turns: default_max_turns(),
            min_categories: default_min_categories(),
            stale_turns: default_stale_turns(),
            capability_timeout_secs: default_capability_timeout(),
        }
    }
}

fn default_max_turns() -> u32 {
    20
}

fn default_min_categories() -> usize {
    2
}

fn default_stale_turns() -> u32 {
    5
}

fn default_capability_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_standard_policy() {
        let config = EngagementConfig::default();
        assert_eq!(config.policy(), TerminationPolicy::default());
        assert_eq!(config.capability_timeout(), Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_turn_limit_is_rejected() {
        let config = EngagementConfig {
            max_turns: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn category_threshold_is_bounded() {
        let config = EngagementConfig {
            min_categories: 6,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
