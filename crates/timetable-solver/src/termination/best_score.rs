use timetable_core::HardSoftScore;

use super::{Termination, TerminationReason};
use crate::scope::SolverScope;

/// Stops once the best score reaches `target`.
#[derive(Debug, Clone)]
pub struct BestScoreTermination {
    target: HardSoftScore,
}

impl BestScoreTermination {
    pub fn new(target: HardSoftScore) -> Self {
        Self { target }
    }
}

impl Termination for BestScoreTermination {
    fn check(&self, solver_scope: &SolverScope) -> Option<TerminationReason> {
        solver_scope
            .best_score()
            .is_some_and(|score| score >= self.target)
            .then_some(TerminationReason::BestScoreReached)
    }
}
