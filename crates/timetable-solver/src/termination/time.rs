//! Wall-clock termination.

use std::time::Duration;

use super::{Termination, TerminationReason};
use crate::scope::SolverScope;

/// Stops once the solve has run for `limit`.
#[derive(Debug, Clone)]
pub struct TimeTermination {
    limit: Duration,
}

impl TimeTermination {
    pub fn new(limit: Duration) -> Self {
        Self { limit }
    }

    pub fn millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn seconds(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }
}

impl Termination for TimeTermination {
    fn check(&self, solver_scope: &SolverScope) -> Option<TerminationReason> {
        solver_scope
            .elapsed()
            .is_some_and(|e| e >= self.limit)
            .then_some(TerminationReason::TimeLimit)
    }
}
