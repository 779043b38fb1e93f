//! Session aggregate entity.
//!
//! A session is the full state of one engagement with a single message
//! sender. It is created lazily on first contact and mutated only through
//! the methods here, which enforce the engine's invariants:
//!
//! - `turn_count` never decreases
//! - every category's value set only grows (union across turns)
//! - persona, once set, never changes
//! - status transitions Active -> Ended at most once; Ended freezes the
//!   session, and attempted mutation afterwards is a no-op, not an error

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{SessionId, Timestamp};
use crate::domain::intelligence::ExtractedIntelligence;

use super::{EngagementStatus, Persona};

/// Per-conversation engagement state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Caller-supplied identifier, unique per conversation.
    id: SessionId,

    /// Number of processed turns. Starts at 0.
    turn_count: u32,

    /// Set once true by the external classifier; never reset.
    scam_confirmed: bool,

    /// Decoy persona, fixed after first confirmation.
    persona: Option<Persona>,

    /// Union of everything extracted across all turns.
    intelligence: ExtractedIntelligence,

    /// Turn count at which the intelligence union last grew.
    /// `None` until the first strict growth - a session that never yields
    /// intelligence never counts as stale, only the turn cap ends it.
    last_intelligence_turn: Option<u32>,

    /// Active or Ended.
    status: EngagementStatus,

    /// When the session was created.
    created_at: Timestamp,
}

impl Session {
    /// Creates a new Active session with zeroed counters.
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            turn_count: 0,
            scam_confirmed: false,
            persona: None,
            intelligence: ExtractedIntelligence::new(),
            last_intelligence_turn: None,
            status: EngagementStatus::Active,
            created_at: Timestamp::now(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    pub fn scam_confirmed(&self) -> bool {
        self.scam_confirmed
    }

    pub fn persona(&self) -> Option<Persona> {
        self.persona
    }

    pub fn intelligence(&self) -> &ExtractedIntelligence {
        &self.intelligence
    }

    pub fn last_intelligence_turn(&self) -> Option<u32> {
        self.last_intelligence_turn
    }

    pub fn status(&self) -> EngagementStatus {
        self.status
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    // ─────────────────────────────────────────────────────────────────────
    // Mutations (all no-ops once Ended)
    // ─────────────────────────────────────────────────────────────────────

    /// Records the classifier's confirmation: sets the scam flag and, if no
    /// persona is assigned yet, adopts the suggested one. The persona
    /// argument is ignored on later calls - persona consistency wins.
    pub fn confirm_scam(&mut self, persona: Persona) {
        if !self.status.is_active() {
            return;
        }
        self.scam_confirmed = true;
        if self.persona.is_none() {
            self.persona = Some(persona);
        }
    }

    /// Unions newly extracted values into the session.
    ///
    /// Returns true iff at least one category set strictly grew; in that
    /// case `last_intelligence_turn` is stamped with the current (pre-
    /// increment) turn count. No-op on an Ended session.
    pub fn merge_intelligence(&mut self, findings: &ExtractedIntelligence) -> bool {
        if !self.status.is_active() {
            return false;
        }
        let grew = self.intelligence.merge(findings);
        if grew {
            self.last_intelligence_turn = Some(self.turn_count);
        }
        grew
    }

    /// Adds one to the turn counter and returns the new value.
    ///
    /// On an Ended session the counter is left unchanged and its current
    /// value is returned.
    pub fn increment_turn(&mut self) -> u32 {
        if self.status.is_active() {
            self.turn_count += 1;
        }
        self.turn_count
    }

    /// Transitions Active -> Ended.
    ///
    /// Returns true iff this call performed the transition; false when the
    /// session was already Ended (idempotent). The caller that observes
    /// `true` owns the one-and-only report delivery.
    pub fn mark_ended(&mut self) -> bool {
        if self.status.can_transition_to(&EngagementStatus::Ended) {
            self.status = EngagementStatus::Ended;
            true
        } else {
            false
        }
    }

    /// Read-only snapshot for policy evaluation and reporting.
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            session_id: self.id.clone(),
            turn_count: self.turn_count,
            scam_confirmed: self.scam_confirmed,
            persona: self.persona,
            intelligence: self.intelligence.clone(),
            last_intelligence_turn: self.last_intelligence_turn,
            status: self.status,
            created_at: self.created_at,
        }
    }
}

/// Point-in-time snapshot of a session.
///
/// This is what crosses the store boundary: the termination policy reads it,
/// the coordinator reports from it, diagnostics serialize it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub session_id: SessionId,
    pub turn_count: u32,
    pub scam_confirmed: bool,
    pub persona: Option<Persona>,
    pub intelligence: ExtractedIntelligence,
    pub last_intelligence_turn: Option<u32>,
    pub status: EngagementStatus,
    pub created_at: Timestamp,
}

impl SessionSummary {
    /// True when the conversation is still live.
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Turns elapsed since the intelligence union last grew, or `None` for
    /// a session that never produced intelligence.
    pub fn turns_since_last_intelligence(&self) -> Option<u32> {
        self.last_intelligence_turn
            .map(|last| self.turn_count.saturating_sub(last))
    }
}
