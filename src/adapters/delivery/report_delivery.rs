//! Retrying report delivery.
//!
//! Wraps any [`ReportEndpoint`] with the bounded retry schedule the
//! evaluator contract requires: up to 3 attempts, each capped at 10 seconds,
//! an exponential 2s/4s/8s backoff sleep after every failed attempt.
//! `deliver` never raises - exhausting the budget is reported as `false`,
//! and every attempt outcome is traced.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::{info, warn};

use crate::ports::{DeliveryError, FinalReport, ReportEndpoint};

/// Retry schedule for final-report delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetrySchedule {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Backoff after the first failed attempt; doubles each failure.
    pub base_delay: Duration,
    /// Wall-clock budget for a single attempt.
    pub attempt_timeout: Duration,
}

impl Default for RetrySchedule {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(2),
            attempt_timeout: Duration::from_secs(10),
        }
    }
}

impl RetrySchedule {
    /// Backoff to sleep after the given zero-based failed attempt: 2s, 4s, 8s.
    /// Saturates instead of overflowing for very large attempt numbers.
    fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }
}

/// Delivers final reports with bounded retries.
///
/// Invoked exactly once per session, at the Active -> Ended transition; the
/// exactly-once guard lives with the caller (the store's `mark_ended`
/// transition result), not here.
#[derive(Clone)]
pub struct ReportDelivery {
    endpoint: Arc<dyn ReportEndpoint>,
    schedule: RetrySchedule,
}

impl ReportDelivery {
    /// Creates a delivery wrapper with the default schedule.
    pub fn new(endpoint: Arc<dyn ReportEndpoint>) -> Self {
        Self {
            endpoint,
            schedule: RetrySchedule::default(),
        }
    }

    /// Overrides the retry schedule.
    pub fn with_schedule(mut self, schedule: RetrySchedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Sends the report, retrying per the schedule.
    ///
    /// Returns true on the first successful attempt, false once the budget
    /// is exhausted. Never returns an error and never panics.
    pub async fn deliver(&self, report: &FinalReport) -> bool {
        let session_id = report.session_id.clone();
        for attempt in 0..self.schedule.max_attempts {
            let outcome = match timeout(self.schedule.attempt_timeout, self.endpoint.send(report))
                .await
            {
                Ok(result) => result,
                Err(_) => Err(DeliveryError::Timeout {
                    timeout_secs: self.schedule.attempt_timeout.as_secs(),
                }),
            };

            match outcome {
                Ok(()) => {
                    info!(
                        session_id = %session_id,
                        attempt = attempt + 1,
                        "final report delivered"
                    );
                    return true;
                }
                Err(err) => {
                    warn!(
                        session_id = %session_id,
                        attempt = attempt + 1,
                        max_attempts = self.schedule.max_attempts,
                        error = %err,
                        "report delivery attempt failed"
                    );
                    sleep(self.schedule.backoff(attempt)).await;
                }
            }
        }

        warn!(
            session_id = %session_id,
            attempts = self.schedule.max_attempts,
            "report delivery exhausted all attempts"
        );
        false
    }
}
