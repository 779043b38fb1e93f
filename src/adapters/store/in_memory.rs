//! In-Memory Session Store Adapter
//!
//! Holds every live engagement in a map of per-session slots. Each slot
//! carries its own state mutex and its own turn gate, so two sessions never
//! contend with each other; the map-level RwLock is held only for lookup
//! and insert, never across a session mutation.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use tracing::debug;

use crate::domain::foundation::SessionId;
use crate::domain::intelligence::ExtractedIntelligence;
use crate::domain::session::{Persona, Session, SessionSummary};
use crate::ports::SessionStore;

/// One session's share of the store.
#[derive(Clone)]
struct SessionSlot {
    /// The aggregate itself; every mutation goes through this lock.
    state: Arc<Mutex<Session>>,
    /// Coordinator-level gate serializing whole turns for this identifier.
    gate: Arc<Mutex<()>>,
}

impl SessionSlot {
    fn new(id: SessionId) -> Self {
        Self {
            state: Arc::new(Mutex::new(Session::new(id))),
            gate: Arc::new(Mutex::new(())),
        }
    }
}

/// In-memory store for engagement sessions.
///
/// Process-lifetime durability only; swap behind the [`SessionStore`] port
/// for anything persistent.
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    slots: Arc<RwLock<HashMap<SessionId, SessionSlot>>>,
}

impl InMemorySessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sessions currently held (useful for diagnostics/tests).
    pub async fn session_count(&self) -> usize {
        self.slots.read().await.len()
    }

    /// Returns the slot for an existing session, if any.
    async fn existing_slot(&self, id: &SessionId) -> Option<SessionSlot> {
        self.slots.read().await.get(id).cloned()
    }

    /// Returns the slot for the session, creating it if needed. The
    /// write-lock re-check makes creation idempotent under races: the
    /// first writer wins, later callers get its slot.
    async fn slot(&self, id: &SessionId) -> SessionSlot {
        if let Some(slot) = self.existing_slot(id).await {
            return slot;
        }
        let mut slots = self.slots.write().await;
        slots
            .entry(id.clone())
            .or_insert_with(|| {
                debug!(session_id = %id, "created new session");
                SessionSlot::new(id.clone())
            })
            .clone()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get_or_create(&self, id: &SessionId) -> SessionSummary {
        let slot = self.slot(id).await;
        let session = slot.state.lock().await;
        session.summary()
    }

    async fn confirm_scam(&self, id: &SessionId, persona: Persona) {
        if let Some(slot) = self.existing_slot(id).await {
            slot.state.lock().await.confirm_scam(persona);
        }
    }

    async fn merge_intelligence(&self, id: &SessionId, findings: &ExtractedIntelligence) -> bool {
        match self.existing_slot(id).await {
            Some(slot) => {
                let mut session = slot.state.lock().await;
                let grew = session.merge_intelligence(findings);
                if grew {
                    debug!(
                        session_id = %id,
                        turn = session.turn_count(),
                        total_items = session.intelligence().total_items(),
                        "intelligence union grew"
                    );
                }
                grew
            }
            None => false,
        }
    }

    async fn increment_turn(&self, id: &SessionId) -> u32 {
        match self.existing_slot(id).await {
            Some(slot) => slot.state.lock().await.increment_turn(),
            None => 0,
        }
    }

    async fn mark_ended(&self, id: &SessionId) -> bool {
        match self.existing_slot(id).await {
            Some(slot) => {
                let mut session = slot.state.lock().await;
                let transitioned = session.mark_ended();
                if transitioned {
                    debug!(session_id = %id, turns = session.turn_count(), "session ended");
                }
                transitioned
            }
            None => false,
        }
    }

    async fn summary(&self, id: &SessionId) -> Option<SessionSummary> {
        match self.existing_slot(id).await {
            Some(slot) => Some(slot.state.lock().await.summary()),
            None => None,
        }
    }

    async fn turn_gate(&self, id: &SessionId) -> OwnedMutexGuard<()> {
        let slot = self.slot(id).await;
        slot.gate.lock_owned().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::intelligence::IntelligenceCategory;
    use crate::domain::session::EngagementStatus;

    fn sid(s: &str) -> SessionId {
        SessionId::new(s).unwrap()
    }

    fn findings(value: &str) -> ExtractedIntelligence {
        let mut intel = ExtractedIntelligence::new();
        intel.insert(IntelligenceCategory::UpiId, value);
        intel
    }

    #[tokio::test]
    async fn creates_lazily_and_once() {
        let store = InMemorySessionStore::new();
        let id = sid("lazy");

        let first = store.get_or_create(&id).await;
        assert_eq!(first.turn_count, 0);
        assert_eq!(store.session_count().await, 1);

        store.increment_turn(&id).await;
        let second = store.get_or_create(&id).await;
        assert_eq!(second.turn_count, 1);
        assert_eq!(store.session_count().await, 1);
    }

    #[tokio::test]
    async fn concurrent_get_or_create_yields_one_session() {
        let store = Arc::new(InMemorySessionStore::new());
        let id = sid("race");

        let mut handles = Vec::new();
        for _ in 0..16 {
            let store = store.clone();
            let id = id.clone();
            handles.push(tokio::spawn(async move {
                store.get_or_create(&id).await;
                store.increment_turn(&id).await
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.session_count().await, 1);
        assert_eq!(store.summary(&id).await.unwrap().turn_count, 16);
    }

    #[tokio::test]
    async fn operations_on_unknown_session_are_noops() {
        let store = InMemorySessionStore::new();
        let id = sid("ghost");

        assert!(!store.merge_intelligence(&id, &findings("a@paytm")).await);
        assert_eq!(store.increment_turn(&id).await, 0);
        assert!(!store.mark_ended(&id).await);
        store.confirm_scam(&id, Persona::Elderly).await;
        assert!(store.summary(&id).await.is_none());
        assert_eq!(store.session_count().await, 0);
    }

    #[tokio::test]
    async fn merge_reports_growth_and_stamps_turn() {
        let store = InMemorySessionStore::new();
        let id = sid("merge");
        store.get_or_create(&id).await;
        store.increment_turn(&id).await;

        assert!(store.merge_intelligence(&id, &findings("a@paytm")).await);
        assert!(!store.merge_intelligence(&id, &findings("a@paytm")).await);

        let summary = store.summary(&id).await.unwrap();
        assert_eq!(summary.last_intelligence_turn, Some(1));
    }

    #[tokio::test]
    async fn mark_ended_is_idempotent_and_freezes() {
        let store = InMemorySessionStore::new();
        let id = sid("end");
        store.get_or_create(&id).await;
        store.increment_turn(&id).await;

        assert!(store.mark_ended(&id).await);
        assert!(!store.mark_ended(&id).await);

        assert_eq!(store.increment_turn(&id).await, 1);
        assert!(!store.merge_intelligence(&id, &findings("late@paytm")).await);

        let summary = store.summary(&id).await.unwrap();
        assert_eq!(summary.status, EngagementStatus::Ended);
        assert!(summary.intelligence.is_empty());
    }

    #[tokio::test]
    async fn sessions_do_not_share_state() {
        let store = InMemorySessionStore::new();
        let a = sid("a");
        let b = sid("b");
        store.get_or_create(&a).await;
        store.get_or_create(&b).await;

        store.increment_turn(&a).await;
        store.merge_intelligence(&a, &findings("a@paytm")).await;
        store.mark_ended(&a).await;

        let summary_b = store.summary(&b).await.unwrap();
        assert_eq!(summary_b.turn_count, 0);
        assert!(summary_b.intelligence.is_empty());
        assert!(summary_b.is_active());
    }

    #[tokio::test]
    async fn turn_gate_serializes_same_session() {
        let store = Arc::new(InMemorySessionStore::new());
        let id = sid("gate");

        let gate = store.turn_gate(&id).await;

        let store2 = store.clone();
        let id2 = id.clone();
        let contender = tokio::spawn(async move {
            let _gate = store2.turn_gate(&id2).await;
        });

        // The contender cannot acquire the gate while we hold it.
        tokio::task::yield_now().await;
        assert!(!contender.is_finished());

        drop(gate);
        contender.await.unwrap();
    }

    #[tokio::test]
    async fn turn_gate_is_independent_across_sessions() {
        let store = InMemorySessionStore::new();
        let _gate_a = store.turn_gate(&sid("one")).await;
        // Acquiring another session's gate must not block.
        let _gate_b = store.turn_gate(&sid("two")).await;
    }
}
