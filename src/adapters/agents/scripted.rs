//! Scripted capability doubles for tests.
//!
//! Fixed verdicts and replies with call counting, so coordinator tests can
//! pin the capability behavior exactly.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;

use crate::domain::session::Persona;
use crate::ports::{
    ClassifierError, PersonaResponder, ResponderError, ScamClassifier, ScamVerdict,
    TranscriptMessage,
};

/// [`ScamClassifier`] that always returns a fixed outcome.
pub struct ScriptedClassifier {
    outcome: Result<ScamVerdict, ClassifierError>,
    delay: Option<Duration>,
    calls: AtomicU32,
}

impl ScriptedClassifier {
    /// Always returns the given verdict.
    pub fn returning(verdict: ScamVerdict) -> Self {
        Self {
            outcome: Ok(verdict),
            delay: None,
            calls: AtomicU32::new(0),
        }
    }

    /// Always fails with the given error.
    pub fn failing(error: ClassifierError) -> Self {
        Self {
            outcome: Err(error),
            delay: None,
            calls: AtomicU32::new(0),
        }
    }

    /// Sleeps for `delay` before answering; exercises the caller's timeout.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ScamClassifier for ScriptedClassifier {
    async fn classify(
        &self,
        _text: &str,
        _history: &[TranscriptMessage],
    ) -> Result<ScamVerdict, ClassifierError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            sleep(delay).await;
        }
        self.outcome.clone()
    }
}

/// [`PersonaResponder`] that always returns a fixed reply.
pub struct ScriptedResponder {
    outcome: Result<String, ResponderError>,
    calls: AtomicU32,
}

impl ScriptedResponder {
    /// Always returns the given reply.
    pub fn returning(reply: impl Into<String>) -> Self {
        Self {
            outcome: Ok(reply.into()),
            calls: AtomicU32::new(0),
        }
    }

    /// Always fails with the given error.
    pub fn failing(error: ResponderError) -> Self {
        Self {
            outcome: Err(error),
            calls: AtomicU32::new(0),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PersonaResponder for ScriptedResponder {
    async fn respond(
        &self,
        _text: &str,
        _persona: Persona,
        _history: &[TranscriptMessage],
    ) -> Result<String, ResponderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}
