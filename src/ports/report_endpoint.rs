//! Report Endpoint port - one delivery attempt of the final report.
//!
//! Implementations perform a single send; the retry schedule, attempt
//! timeout, and the never-raise guarantee live in
//! [`ReportDelivery`](crate::adapters::delivery::ReportDelivery), which wraps
//! any endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::SessionId;
use crate::domain::intelligence::ExtractedIntelligence;

/// Port for posting a final report to the external evaluator.
#[async_trait]
pub trait ReportEndpoint: Send + Sync {
    /// Performs exactly one delivery attempt.
    async fn send(&self, report: &FinalReport) -> Result<(), DeliveryError>;
}

/// The final engagement summary sent to the evaluator.
///
/// Wire shape (camelCase) matches the evaluator contract:
/// session identifier, scam flag, turn total, the five intelligence lists,
/// and free-text notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalReport {
    pub session_id: SessionId,
    pub scam_detected: bool,
    pub total_messages_exchanged: u32,
    pub extracted_intelligence: ExtractedIntelligence,
    pub agent_notes: String,
}

impl FinalReport {
    /// Creates a final report.
    pub fn new(
        session_id: SessionId,
        scam_detected: bool,
        total_messages_exchanged: u32,
        extracted_intelligence: ExtractedIntelligence,
        agent_notes: impl Into<String>,
    ) -> Self {
        Self {
            session_id,
            scam_detected,
            total_messages_exchanged,
            extracted_intelligence,
            agent_notes: agent_notes.into(),
        }
    }
}

/// Errors from a single delivery attempt.
#[derive(Debug, Clone, Error)]
pub enum DeliveryError {
    /// Could not reach the endpoint.
    #[error("network error: {0}")]
    Network(String),

    /// Endpoint answered with a non-success status.
    #[error("endpoint returned status {status}")]
    Status { status: u16 },

    /// Attempt exceeded its time budget.
    #[error("attempt timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },
}

impl DeliveryError {
    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }
}
