//! Termination conditions for a solve.
//!
//! Every condition reports *why* it fired, so the finished solve can tell a
//! time limit apart from a cancellation or a reached target score.

mod best_score;
mod composite;
mod external;
mod step_count;
mod time;
mod unimproved;

use std::fmt::{self, Debug};

use crate::scope::SolverScope;

pub use best_score::BestScoreTermination;
pub use composite::OrTermination;
pub use external::ExternalTermination;
pub use step_count::StepCountTermination;
pub use time::TimeTermination;
pub use unimproved::{UnimprovedStepCountTermination, UnimprovedTimeTermination};

/// Why a solve stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminationReason {
    /// Every phase ran to its natural end.
    Completed,
    TimeLimit,
    StepLimit,
    UnimprovedSteps,
    UnimprovedTime,
    BestScoreReached,
    Cancelled,
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Completed => "completed",
            Self::TimeLimit => "time_limit",
            Self::StepLimit => "step_limit",
            Self::UnimprovedSteps => "unimproved_steps",
            Self::UnimprovedTime => "unimproved_time",
            Self::BestScoreReached => "best_score_reached",
            Self::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

/// Decides when to stop solving.
pub trait Termination: Send + Debug {
    /// Returns the reason to stop, or `None` to keep going.
    fn check(&self, solver_scope: &SolverScope) -> Option<TerminationReason>;

    fn is_terminated(&self, solver_scope: &SolverScope) -> bool {
        self.check(solver_scope).is_some()
    }
}

impl<T: Termination + ?Sized> Termination for Box<T> {
    fn check(&self, solver_scope: &SolverScope) -> Option<TerminationReason> {
        (**self).check(solver_scope)
    }
}
