//! Scriptable in-memory report endpoint for tests.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::ports::{DeliveryError, FinalReport, ReportEndpoint};

enum Behavior {
    /// Every attempt succeeds.
    Succeed,
    /// The first `n` attempts fail with a network error, then succeed.
    FailTimes(u32),
    /// Every attempt fails with a network error.
    AlwaysFail,
    /// Attempts never complete; exercises the attempt timeout.
    Hang,
}

/// In-memory [`ReportEndpoint`] with scripted outcomes.
///
/// Counts attempts and records every report that was accepted, so tests can
/// assert both the retry behavior and the exactly-once delivery guarantee.
pub struct MockReportEndpoint {
    behavior: Behavior,
    attempts: AtomicU32,
    delivered: Mutex<Vec<FinalReport>>,
}

impl MockReportEndpoint {
    pub fn succeeding() -> Self {
        Self::with_behavior(Behavior::Succeed)
    }

    /// Fails the first `n` attempts, then succeeds.
    pub fn failing_times(n: u32) -> Self {
        Self::with_behavior(Behavior::FailTimes(n))
    }

    pub fn always_failing() -> Self {
        Self::with_behavior(Behavior::AlwaysFail)
    }

    /// Never completes an attempt.
    pub fn hanging() -> Self {
        Self::with_behavior(Behavior::Hang)
    }

    fn with_behavior(behavior: Behavior) -> Self {
        Self {
            behavior,
            attempts: AtomicU32::new(0),
            delivered: Mutex::new(Vec::new()),
        }
    }

    /// Number of send attempts observed so far.
    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Reports accepted by a successful attempt, in arrival order.
    pub fn delivered(&self) -> Vec<FinalReport> {
        self.delivered.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReportEndpoint for MockReportEndpoint {
    async fn send(&self, report: &FinalReport) -> Result<(), DeliveryError> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            Behavior::Succeed => {}
            Behavior::FailTimes(n) if attempt < n => {
                return Err(DeliveryError::network("scripted failure"))
            }
            Behavior::FailTimes(_) => {}
            Behavior::AlwaysFail => return Err(DeliveryError::network("scripted failure")),
            Behavior::Hang => {
                std::future::pending::<()>().await;
                unreachable!("pending future never resolves");
            }
        }
        self.delivered.lock().unwrap().push(report.clone());
        Ok(())
    }
}
