//! Termination policy - when to stop stringing a scammer along.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::SessionSummary;

/// Why an engagement ended.
///
/// The boolean decision is a plain OR of the three rules; the variant only
/// exists so diagnostics and the final report can cite a single reason.
/// Tie-break order when several rules hold at once: sufficiency, then the
/// turn cap, then staleness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// Enough distinct intelligence categories collected.
    IntelligenceSufficient,
    /// Hard cap on conversation length reached.
    TurnLimitReached,
    /// No new intelligence for too many turns.
    ConversationStale,
}

impl EndReason {
    /// Human-readable note for the final report.
    pub fn note(&self) -> &'static str {
        match self {
            EndReason::IntelligenceSufficient => {
                "sufficient intelligence categories collected"
            }
            EndReason::TurnLimitReached => "maximum conversation turns reached",
            EndReason::ConversationStale => "no new intelligence in recent turns",
        }
    }
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.note())
    }
}

/// Pure decision function over a session snapshot.
///
/// Evaluated by the coordinator after every turn's merge and increment. The
/// policy never mutates anything; acting on the decision (ending the session,
/// triggering delivery) is the coordinator's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminationPolicy {
    /// Hard cap on processed turns.
    pub max_turns: u32,
    /// Non-empty categories needed to declare the haul sufficient.
    pub min_categories: usize,
    /// Turns without new intelligence before the conversation counts as
    /// stale. Only applies once intelligence has been found at least once.
    pub stale_turns: u32,
}

impl Default for TerminationPolicy {
    fn default() -> Self {
        Self {
            max_turns: 20,
            min_categories: 2,
            stale_turns: 5,
        }
    }
}

impl TerminationPolicy {
    /// Returns the reason to end, or `None` to keep the conversation going.
    pub fn evaluate(&self, summary: &SessionSummary) -> Option<EndReason> {
        if summary.intelligence.non_empty_categories() >= self.min_categories {
            return Some(EndReason::IntelligenceSufficient);
        }
        if summary.turn_count >= self.max_turns {
            return Some(EndReason::TurnLimitReached);
        }
        if let Some(idle) = summary.turns_since_last_intelligence() {
            if idle >= self.stale_turns {
                return Some(EndReason::ConversationStale);
            }
        }
        None
    }

    /// Boolean form of [`evaluate`](Self::evaluate).
    pub fn should_end(&self, summary: &SessionSummary) -> bool {
        self.evaluate(summary).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SessionId;
    use crate::domain::intelligence::IntelligenceCategory;
    use crate::domain::session::Session;

    fn session() -> Session {
        Session::new(SessionId::new("policy-test").unwrap())
    }

    fn add(session: &mut Session, category: IntelligenceCategory, value: &str) {
        let mut intel = crate::domain::intelligence::ExtractedIntelligence::new();
        intel.insert(category, value);
        assert!(session.merge_intelligence(&intel));
    }

    #[test]
    fn fresh_session_continues() {
        let policy = TerminationPolicy::default();
        assert_eq!(policy.evaluate(&session().summary()), None);
    }

    #[test]
    fn two_categories_end_immediately() {
        // UPI id on turn 1, phone number on turn 2: ends right after the
        // second merge, independent of turn count or staleness.
        let policy = TerminationPolicy::default();
        let mut s = session();

        add(&mut s, IntelligenceCategory::UpiId, "scammer@paytm");
        s.increment_turn();
        assert_eq!(policy.evaluate(&s.summary()), None);

        add(&mut s, IntelligenceCategory::PhoneNumber, "9876543210");
        s.increment_turn();
        assert_eq!(
            policy.evaluate(&s.summary()),
            Some(EndReason::IntelligenceSufficient)
        );
    }

    #[test]
    fn two_categories_on_first_turn_end_on_first_turn() {
        let policy = TerminationPolicy::default();
        let mut s = session();
        add(&mut s, IntelligenceCategory::UpiId, "scammer@paytm");
        add(&mut s, IntelligenceCategory::PhishingLink, "http://fake.io");
        s.increment_turn();
        assert!(policy.should_end(&s.summary()));
    }

    #[test]
    fn hard_cap_fires_at_twenty_turns_without_any_intelligence() {
        // Staleness never fires for a session that yielded nothing; only
        // the cap ends it.
        let policy = TerminationPolicy::default();
        let mut s = session();

        for turn in 1..20 {
            s.increment_turn();
            assert_eq!(policy.evaluate(&s.summary()), None, "ended early at turn {turn}");
        }
        s.increment_turn();
        assert_eq!(
            policy.evaluate(&s.summary()),
            Some(EndReason::TurnLimitReached)
        );
    }

    #[test]
    fn staleness_fires_after_quiet_turns() {
        let policy = TerminationPolicy::default();
        let mut s = session();

        // Intelligence on the first turn, then silence.
        add(&mut s, IntelligenceCategory::UpiId, "scammer@paytm");
        s.increment_turn();

        for _ in 0..3 {
            s.increment_turn();
            assert_eq!(policy.evaluate(&s.summary()), None);
        }
        s.increment_turn(); // turn 5, last growth stamped at turn 0
        assert_eq!(
            policy.evaluate(&s.summary()),
            Some(EndReason::ConversationStale)
        );
    }

    #[test]
    fn sufficiency_wins_tie_breaks() {
        let policy = TerminationPolicy {
            max_turns: 1,
            min_categories: 2,
            stale_turns: 1,
        };
        let mut s = session();
        add(&mut s, IntelligenceCategory::UpiId, "a@paytm");
        add(&mut s, IntelligenceCategory::PhoneNumber, "9876543210");
        s.increment_turn();

        // All three rules hold; sufficiency is reported.
        assert_eq!(
            policy.evaluate(&s.summary()),
            Some(EndReason::IntelligenceSufficient)
        );
    }

    #[test]
    fn cap_wins_over_staleness() {
        let policy = TerminationPolicy {
            max_turns: 3,
            min_categories: 5,
            stale_turns: 2,
        };
        let mut s = session();
        add(&mut s, IntelligenceCategory::UpiId, "a@paytm");
        for _ in 0..3 {
            s.increment_turn();
        }
        assert_eq!(
            policy.evaluate(&s.summary()),
            Some(EndReason::TurnLimitReached)
        );
    }

    #[test]
    fn policy_does_not_mutate() {
        let policy = TerminationPolicy::default();
        let s = session();
        let before = s.summary();
        let _ = policy.evaluate(&before);
        assert_eq!(s.summary(), before);
    }
}
