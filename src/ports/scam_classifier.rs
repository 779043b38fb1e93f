//! Scam Classifier port - the external detection capability.
//!
//! Implementations decide whether a message is part of a scam attempt. The
//! core treats the capability as opaque: it consumes the verdict, applies a
//! conservative default when the capability fails or times out, and never
//! lets a classifier error surface as a turn-processing error.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::TranscriptMessage;

/// Port for scam classification.
#[async_trait]
pub trait ScamClassifier: Send + Sync {
    /// Classifies the latest message in the context of the conversation.
    async fn classify(
        &self,
        text: &str,
        history: &[TranscriptMessage],
    ) -> Result<ScamVerdict, ClassifierError>;
}

/// Classifier output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScamVerdict {
    /// Whether the message looks like a scam.
    pub is_scam: bool,
    /// Confidence in the verdict, 0.0 - 1.0.
    pub confidence: f32,
    /// Short human-readable justification.
    pub reason: String,
    /// Indicators the classifier keyed on.
    pub indicators: Vec<String>,
}

impl ScamVerdict {
    /// Creates a verdict.
    pub fn new(is_scam: bool, confidence: f32, reason: impl Into<String>) -> Self {
        Self {
            is_scam,
            confidence: confidence.clamp(0.0, 1.0),
            reason: reason.into(),
            indicators: Vec::new(),
        }
    }

    /// Adds the indicators the classifier keyed on.
    pub fn with_indicators(mut self, indicators: Vec<String>) -> Self {
        self.indicators = indicators;
        self
    }

    /// The caller-side default when the capability is unavailable or slow:
    /// not-yet-classified at neutral confidence. Never blocks a turn.
    pub fn unavailable() -> Self {
        Self {
            is_scam: false,
            confidence: 0.5,
            reason: "unavailable".to_string(),
            indicators: Vec::new(),
        }
    }
}

/// Classifier capability errors.
#[derive(Debug, Clone, Error)]
pub enum ClassifierError {
    /// Capability did not answer within its budget.
    #[error("classifier timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Capability is unreachable or failing.
    #[error("classifier unavailable: {0}")]
    Unavailable(String),

    /// Capability answered with something unusable.
    #[error("malformed classifier reply: {0}")]
    MalformedReply(String),
}

impl ClassifierError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    /// Creates a malformed reply error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedReply(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_is_clamped() {
        assert_eq!(ScamVerdict::new(true, 1.7, "x").confidence, 1.0);
        assert_eq!(ScamVerdict::new(false, -0.3, "x").confidence, 0.0);
    }

    #[test]
    fn unavailable_default_is_conservative() {
        let verdict = ScamVerdict::unavailable();
        assert!(!verdict.is_scam);
        assert_eq!(verdict.confidence, 0.5);
        assert_eq!(verdict.reason, "unavailable");
        assert!(verdict.indicators.is_empty());
    }

    #[test]
    fn verdict_serializes_camel_case() {
        let verdict = ScamVerdict::new(true, 0.9, "upi handle present");
        let json = serde_json::to_value(&verdict).unwrap();
        assert_eq!(json["isScam"], true);
        assert!(json.get("confidence").is_some());
    }
}
