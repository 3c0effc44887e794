//! Terminations based on lack of improvement of the best score.

use std::time::Duration;

use super::{Termination, TerminationReason};
use crate::scope::SolverScope;

/// Stops after `limit` steps without a new best score. Never fires before
/// a best score exists.
#[derive(Debug, Clone)]
pub struct UnimprovedStepCountTermination {
    limit: u64,
}

impl UnimprovedStepCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl Termination for UnimprovedStepCountTermination {
    fn check(&self, solver_scope: &SolverScope) -> Option<TerminationReason> {
        // Nothing counts as unimproved before the first best timetable.
        solver_scope.best_score()?;
        (solver_scope.steps_since_improvement() >= self.limit)
            .then_some(TerminationReason::UnimprovedSteps)
    }
}

/// Stops after `limit` of wall-clock time without a new best score.
#[derive(Debug, Clone)]
pub struct UnimprovedTimeTermination {
    limit: Duration,
}

impl UnimprovedTimeTermination {
    pub fn new(limit: Duration) -> Self {
        Self { limit }
    }

    pub fn seconds(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }
}

impl Termination for UnimprovedTimeTermination {
    fn check(&self, solver_scope: &SolverScope) -> Option<TerminationReason> {
        solver_scope.best_score()?;
        solver_scope
            .time_since_improvement()
            .is_some_and(|t| t >= self.limit)
            .then_some(TerminationReason::UnimprovedTime)
    }
}
