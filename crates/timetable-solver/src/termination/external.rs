//! Termination driven from outside the solving thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::{Termination, TerminationReason};
use crate::scope::SolverScope;

/// Stops when a shared flag is raised, e.g. by a cancel request.
#[derive(Debug, Clone)]
pub struct ExternalTermination {
    flag: Arc<AtomicBool>,
}

impl ExternalTermination {
    pub fn new(flag: Arc<AtomicBool>) -> Self {
        Self { flag }
    }
}

impl Termination for ExternalTermination {
    fn check(&self, _solver_scope: &SolverScope) -> Option<TerminationReason> {
        self.flag
            .load(Ordering::SeqCst)
            .then_some(TerminationReason::Cancelled)
    }
}
