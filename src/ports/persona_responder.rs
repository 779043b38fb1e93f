//! Persona Responder port - the external response-generation capability.
//!
//! Given the scammer's message and the session's persona, produce the next
//! decoy reply. The core makes no promise about the content beyond "some
//! string"; failures are recovered with a neutral acknowledgement line by
//! the coordinator.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::session::Persona;

use super::TranscriptMessage;

/// Port for decoy response generation.
#[async_trait]
pub trait PersonaResponder: Send + Sync {
    /// Generates the next reply in the given persona's voice.
    async fn respond(
        &self,
        text: &str,
        persona: Persona,
        history: &[TranscriptMessage],
    ) -> Result<String, ResponderError>;
}

/// Responder capability errors.
#[derive(Debug, Clone, Error)]
pub enum ResponderError {
    /// Capability did not answer within its budget.
    #[error("responder timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Capability is unreachable or failing.
    #[error("responder unavailable: {0}")]
    Unavailable(String),
}

impl ResponderError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }
}
