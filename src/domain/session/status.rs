//! Engagement lifecycle status.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a session.
///
/// The only legal transition is Active -> Ended, exactly once. Ended is
/// terminal: no further mutation of turns, intelligence, or persona.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngagementStatus {
    /// Conversation is live; state may still grow.
    Active,
    /// Conversation concluded; state is frozen.
    Ended,
}

impl EngagementStatus {
    /// Whether session state may still be mutated.
    pub fn is_active(&self) -> bool {
        matches!(self, EngagementStatus::Active)
    }

    /// Whether a transition to the given status is legal.
    pub fn can_transition_to(&self, next: &EngagementStatus) -> bool {
        matches!(
            (self, next),
            (EngagementStatus::Active, EngagementStatus::Ended)
        )
    }
}
