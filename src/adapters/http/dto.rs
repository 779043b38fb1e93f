//! HTTP DTOs (Data Transfer Objects) for the engagement API.
//!
//! These types define the JSON request/response structure at the wire. All
//! field names are camelCase; the response shape is fixed by the evaluator
//! contract.

use serde::{Deserialize, Serialize};

use crate::application::TurnOutcome;
use crate::domain::intelligence::ExtractedIntelligence;
use crate::domain::session::SessionSummary;
use crate::ports::TranscriptMessage;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// One transcript entry on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDto {
    /// Who sent it, e.g. "scammer" or "user".
    pub sender: String,
    /// Message body.
    pub text: String,
    /// RFC 3339 timestamp, if the caller tracked one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl MessageDto {
    /// Converts to the port-level transcript type. An unparsable timestamp
    /// is dropped rather than rejected.
    pub fn into_transcript(self) -> TranscriptMessage {
        let message = TranscriptMessage::new(self.sender, self.text);
        match self.timestamp.as_deref().map(str::parse) {
            Some(Ok(ts)) => message.with_timestamp(ts),
            _ => message,
        }
    }
}

/// Request to analyze one incoming scammer message.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    /// Conversation identifier, chosen by the caller.
    pub session_id: String,
    /// The latest message.
    pub message: MessageDto,
    /// Prior transcript, oldest first.
    #[serde(default)]
    pub conversation_history: Vec<MessageDto>,
    /// Free-form caller metadata; accepted and ignored.
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Per-turn engagement metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementMetrics {
    pub conversation_turn: u32,
    pub response_time_ms: u64,
    pub total_intelligence_items: usize,
    pub confidence_score: f32,
}

/// Response for an analyzed turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub status: String,
    pub scam_detected: bool,
    pub agent_response: String,
    pub extracted_intelligence: ExtractedIntelligence,
    pub engagement_metrics: EngagementMetrics,
    pub continue_conversation: bool,
    pub agent_notes: String,
}

impl From<TurnOutcome> for AnalyzeResponse {
    fn from(outcome: TurnOutcome) -> Self {
        Self {
            status: "success".to_string(),
            scam_detected: outcome.scam_detected,
            agent_response: outcome.agent_response,
            extracted_intelligence: outcome.intelligence,
            engagement_metrics: EngagementMetrics {
                conversation_turn: outcome.conversation_turn,
                response_time_ms: outcome.response_time_ms,
                total_intelligence_items: outcome.total_intelligence_items,
                confidence_score: outcome.confidence_score,
            },
            continue_conversation: outcome.continue_conversation,
            agent_notes: outcome.agent_notes,
        }
    }
}

/// Response for a session lookup.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub session: SessionSummary,
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyze_request_parses_minimal_body() {
        let body = r#"{
            "sessionId": "conv-1",
            "message": {"sender": "scammer", "text": "send otp"}
        }"#;
        let request: AnalyzeRequest = serde_json::from_str(body).unwrap();
        assert_eq!(request.session_id, "conv-1");
        assert!(request.conversation_history.is_empty());
        assert!(request.metadata.is_none());
    }

    #[test]
    fn unparsable_timestamp_is_dropped() {
        let dto = MessageDto {
            sender: "scammer".to_string(),
            text: "hi".to_string(),
            timestamp: Some("not-a-date".to_string()),
        };
        assert!(dto.into_transcript().timestamp.is_none());
    }

    #[test]
    fn response_serializes_wire_field_names() {
        let response = AnalyzeResponse {
            status: "success".to_string(),
            scam_detected: true,
            agent_response: "oh dear".to_string(),
            extracted_intelligence: ExtractedIntelligence::new(),
            engagement_metrics: EngagementMetrics {
                conversation_turn: 1,
                response_time_ms: 12,
                total_intelligence_items: 0,
                confidence_score: 0.9,
            },
            continue_conversation: true,
            agent_notes: "".to_string(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["scamDetected"], true);
        assert_eq!(json["engagementMetrics"]["conversationTurn"], 1);
        assert!(json["extractedIntelligence"].get("upiIds").is_some());
    }
}
