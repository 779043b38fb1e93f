//! ProcessTurn command handler - the per-turn coordinator.
//!
//! Owns the fixed sequence every incoming scammer message goes through:
//! acquire the session's turn gate, look up or create the session, consult
//! the classifier, generate the decoy reply, extract and merge intelligence,
//! advance the turn counter, evaluate the termination policy, and - exactly
//! once per session - hand the final report to the delivery pipeline.
//!
//! Capability failures never fail a turn: a classifier that errors or
//! overruns its budget degrades to a neutral verdict, and a responder that
//! fails degrades to a stock acknowledgement line.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::adapters::ReportDelivery;
use crate::domain::foundation::SessionId;
use crate::domain::intelligence::{extract_all, ExtractedIntelligence};
use crate::domain::session::{EndReason, Persona, SessionSummary, TerminationPolicy};
use crate::ports::{
    FinalReport, PersonaResponder, ScamClassifier, ScamVerdict, SessionStore, TranscriptMessage,
};

/// Confidence the classifier must clear before a session is confirmed.
const CONFIRMATION_THRESHOLD: f32 = 0.7;

/// Reply used when the session has already concluded.
const CLOSED_SESSION_REPLY: &str =
    "I don't think I can help with this any further. Goodbye.";

/// Reply used when the responder capability is unavailable.
const FALLBACK_REPLY: &str =
    "Thank you for your message. Let me think about this and get back to you.";

/// Command to process one scammer message.
#[derive(Debug, Clone)]
pub struct ProcessTurnCommand {
    /// Conversation identifier, supplied by the caller.
    pub session_id: SessionId,
    /// The scammer's latest message.
    pub text: String,
    /// Prior transcript, oldest first. May be empty.
    pub history: Vec<TranscriptMessage>,
}

impl ProcessTurnCommand {
    /// Creates a command with an empty transcript.
    pub fn new(session_id: SessionId, text: impl Into<String>) -> Self {
        Self {
            session_id,
            text: text.into(),
            history: Vec::new(),
        }
    }

    /// Attaches the prior transcript.
    pub fn with_history(mut self, history: Vec<TranscriptMessage>) -> Self {
        self.history = history;
        self
    }
}

/// Result of processing one turn.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// Whether the session is confirmed as a scam engagement.
    pub scam_detected: bool,
    /// The decoy's reply to send back.
    pub agent_response: String,
    /// Cumulative intelligence for the session after this turn.
    pub intelligence: ExtractedIntelligence,
    /// Turn number of this message within the session.
    pub conversation_turn: u32,
    /// Wall-clock processing time for this turn.
    pub response_time_ms: u64,
    /// Total values across all intelligence categories.
    pub total_intelligence_items: usize,
    /// Classifier confidence for this turn's verdict.
    pub confidence_score: f32,
    /// False once the termination policy has ended the session.
    pub continue_conversation: bool,
    /// Diagnostic notes: classifier reasoning plus the end reason, if any.
    pub agent_notes: String,
}

/// The per-turn coordinator.
///
/// Cheap to clone; every collaborator sits behind an `Arc`.
#[derive(Clone)]
pub struct ProcessTurnHandler {
    store: Arc<dyn SessionStore>,
    classifier: Arc<dyn ScamClassifier>,
    responder: Arc<dyn PersonaResponder>,
    delivery: Arc<ReportDelivery>,
    policy: TerminationPolicy,
    capability_timeout: Duration,
}

impl ProcessTurnHandler {
    /// Wires the coordinator with the default policy and a 10s capability
    /// budget.
    pub fn new(
        store: Arc<dyn SessionStore>,
        classifier: Arc<dyn ScamClassifier>,
        responder: Arc<dyn PersonaResponder>,
        delivery: Arc<ReportDelivery>,
    ) -> Self {
        Self {
            store,
            classifier,
            responder,
            delivery,
            policy: TerminationPolicy::default(),
            capability_timeout: Duration::from_secs(10),
        }
    }

    /// Overrides the termination policy.
    pub fn with_policy(mut self, policy: TerminationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Overrides the per-capability time budget.
    pub fn with_capability_timeout(mut self, budget: Duration) -> Self {
        self.capability_timeout = budget;
        self
    }

    /// Processes one scammer message end to end.
    ///
    /// Turns for the same session identifier are serialized by the store's
    /// turn gate; turns for distinct identifiers run concurrently. Never
    /// returns an error: capability failures degrade, they do not propagate.
    pub async fn process_turn(&self, command: ProcessTurnCommand) -> TurnOutcome {
        let started = Instant::now();
        let id = command.session_id.clone();

        let _gate = self.store.turn_gate(&id).await;
        let summary = self.store.get_or_create(&id).await;

        if !summary.is_active() {
            debug!(session_id = %id, "turn for concluded session, short-circuiting");
            return Self::closed_outcome(&summary, started);
        }

        let verdict = self.classify(&command).await;

        if verdict.is_scam && verdict.confidence > CONFIRMATION_THRESHOLD {
            let persona = summary
                .persona
                .unwrap_or_else(|| Self::infer_persona(&command.text));
            self.store.confirm_scam(&id, persona).await;
        }

        let findings = extract_all(&command.text);
        let grew = self.store.merge_intelligence(&id, &findings).await;
        let turn = self.store.increment_turn(&id).await;

        // Snapshot after this turn's mutations; policy and report both read it.
        let summary = match self.store.summary(&id).await {
            Some(summary) => summary,
            // Unreachable while the gate is held, but degrade rather than panic.
            None => return Self::closed_outcome_fallback(&id, started),
        };

        let agent_response = self.respond(&command, &summary).await;

        let end_reason = self.policy.evaluate(&summary);
        let mut notes = verdict.reason.clone();
        if let Some(reason) = end_reason {
            notes = format!("{}; {}", notes, reason.note());
            self.conclude(&summary, turn, reason).await;
        }

        info!(
            session_id = %id,
            turn,
            scam_confirmed = summary.scam_confirmed,
            new_intelligence = grew,
            total_items = summary.intelligence.total_items(),
            ended = end_reason.is_some(),
            "turn processed"
        );

        TurnOutcome {
            scam_detected: summary.scam_confirmed,
            agent_response,
            total_intelligence_items: summary.intelligence.total_items(),
            intelligence: summary.intelligence,
            conversation_turn: turn,
            response_time_ms: started.elapsed().as_millis() as u64,
            confidence_score: verdict.confidence,
            continue_conversation: end_reason.is_none(),
            agent_notes: notes,
        }
    }

    /// Consults the classifier within the capability budget; degrades to the
    /// neutral verdict on error or overrun.
    async fn classify(&self, command: &ProcessTurnCommand) -> ScamVerdict {
        match timeout(
            self.capability_timeout,
            self.classifier.classify(&command.text, &command.history),
        )
        .await
        {
            Ok(Ok(verdict)) => verdict,
            Ok(Err(err)) => {
                warn!(session_id = %command.session_id, error = %err, "classifier failed");
                ScamVerdict::unavailable()
            }
            Err(_) => {
                warn!(
                    session_id = %command.session_id,
                    budget_secs = self.capability_timeout.as_secs(),
                    "classifier overran its budget"
                );
                ScamVerdict::unavailable()
            }
        }
    }

    /// Generates the decoy reply. Confirmed sessions speak through the
    /// persona responder; unconfirmed ones get a neutral acknowledgement.
    async fn respond(&self, command: &ProcessTurnCommand, summary: &SessionSummary) -> String {
        let persona = match (summary.scam_confirmed, summary.persona) {
            (true, Some(persona)) => persona,
            _ => return FALLBACK_REPLY.to_string(),
        };

        match timeout(
            self.capability_timeout,
            self.responder
                .respond(&command.text, persona, &command.history),
        )
        .await
        {
            Ok(Ok(reply)) => reply,
            Ok(Err(err)) => {
                warn!(session_id = %command.session_id, error = %err, "responder failed");
                FALLBACK_REPLY.to_string()
            }
            Err(_) => {
                warn!(
                    session_id = %command.session_id,
                    budget_secs = self.capability_timeout.as_secs(),
                    "responder overran its budget"
                );
                FALLBACK_REPLY.to_string()
            }
        }
    }

    /// Ends the session and, iff this call performed the transition, spawns
    /// delivery of the one-and-only final report. Delivery runs detached so
    /// the turn gate is not held across the retry backoff.
    async fn conclude(&self, summary: &SessionSummary, turn: u32, reason: EndReason) {
        if !self.store.mark_ended(&summary.session_id).await {
            return;
        }

        info!(
            session_id = %summary.session_id,
            reason = %reason,
            turns = turn,
            "engagement concluded"
        );

        let report = FinalReport::new(
            summary.session_id.clone(),
            summary.scam_confirmed,
            turn,
            summary.intelligence.clone(),
            reason.note(),
        );
        let delivery = Arc::clone(&self.delivery);
        tokio::spawn(async move {
            delivery.deliver(&report).await;
        });
    }

    /// Crude persona pick from the message register, used only on first
    /// confirmation; an already-assigned persona always wins.
    fn infer_persona(text: &str) -> Persona {
        let lowered = text.to_lowercase();
        if ["investment", "business", "invoice", "profit", "trading"]
            .iter()
            .any(|t| lowered.contains(t))
        {
            Persona::Professional
        } else if ["bank", "account", "pension", "kyc", "card"]
            .iter()
            .any(|t| lowered.contains(t))
        {
            Persona::Elderly
        } else {
            Persona::Novice
        }
    }

    fn closed_outcome(summary: &SessionSummary, started: Instant) -> TurnOutcome {
        TurnOutcome {
            scam_detected: summary.scam_confirmed,
            agent_response: CLOSED_SESSION_REPLY.to_string(),
            total_intelligence_items: summary.intelligence.total_items(),
            intelligence: summary.intelligence.clone(),
            conversation_turn: summary.turn_count,
            response_time_ms: started.elapsed().as_millis() as u64,
            confidence_score: 0.0,
            continue_conversation: false,
            agent_notes: "conversation already concluded".to_string(),
        }
    }

    fn closed_outcome_fallback(id: &SessionId, started: Instant) -> TurnOutcome {
        warn!(session_id = %id, "session vanished mid-turn");
        TurnOutcome {
            scam_detected: false,
            agent_response: CLOSED_SESSION_REPLY.to_string(),
            total_intelligence_items: 0,
            intelligence: ExtractedIntelligence::new(),
            conversation_turn: 0,
            response_time_ms: started.elapsed().as_millis() as u64,
            confidence_score: 0.0,
            continue_conversation: false,
            agent_notes: "conversation already concluded".to_string(),
        }
    }
}
