//! Session Store port - the keyed store owning all per-conversation state.
//!
//! Mutating operations on one session identifier are serialized relative to
//! each other inside the store; operations on distinct identifiers proceed
//! concurrently. On top of that, [`turn_gate`](SessionStore::turn_gate) hands
//! the coordinator a per-identifier mutual-exclusion scope so a whole
//! read-merge-increment-evaluate sequence cannot interleave with another
//! turn for the same conversation.
//!
//! The specified behavior assumes process-lifetime durability only; a
//! durable implementation can replace the in-memory one behind this trait
//! without touching the coordinator.

use async_trait::async_trait;
use tokio::sync::OwnedMutexGuard;

use crate::domain::foundation::SessionId;
use crate::domain::intelligence::ExtractedIntelligence;
use crate::domain::session::{Persona, SessionSummary};

/// Port for the per-conversation state store.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the session's snapshot, creating a new Active session on
    /// first reference to an unseen identifier. Creation is idempotent
    /// under concurrent calls: exactly one session exists per identifier.
    async fn get_or_create(&self, id: &SessionId) -> SessionSummary;

    /// Records the classifier's confirmation (scam flag, persona on first
    /// confirmation). No-op on an Ended or unknown session.
    async fn confirm_scam(&self, id: &SessionId, persona: Persona);

    /// Unions new findings into the session. Returns true iff the union
    /// strictly grew for at least one category. No-op (false) on an Ended
    /// or unknown session.
    async fn merge_intelligence(&self, id: &SessionId, findings: &ExtractedIntelligence) -> bool;

    /// Atomically adds 1 to the turn counter and returns the new value.
    /// On an Ended session returns the current value unchanged; 0 for an
    /// unknown session.
    async fn increment_turn(&self, id: &SessionId) -> u32;

    /// Transitions Active -> Ended. Returns true iff this call performed
    /// the transition (idempotent; false on repeat or unknown session).
    async fn mark_ended(&self, id: &SessionId) -> bool;

    /// Read-only snapshot, `None` for an unknown identifier.
    async fn summary(&self, id: &SessionId) -> Option<SessionSummary>;

    /// Acquires the per-identifier turn gate. The coordinator holds the
    /// guard for the duration of one `process_turn` call; dropping it on
    /// any exit path releases the session for the next turn.
    async fn turn_gate(&self, id: &SessionId) -> OwnedMutexGuard<()>;
}
