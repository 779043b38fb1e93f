//! Conversation transcript entries shared by the capability ports.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// One message of prior conversation context, as supplied by the inbound
/// channel. The core never interprets these beyond passing them to the
/// classifier and responder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptMessage {
    /// Who sent it ("scammer", "honeypot", channel-specific labels).
    pub sender: String,
    /// Raw message text.
    pub text: String,
    /// When it was sent, if the channel knows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
}

impl TranscriptMessage {
    /// Creates a transcript entry without a timestamp.
    pub fn new(sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            text: text.into(),
            timestamp: None,
        }
    }

    /// Sets the timestamp.
    pub fn with_timestamp(mut self, ts: Timestamp) -> Self {
        self.timestamp = Some(ts);
        self
    }
}
