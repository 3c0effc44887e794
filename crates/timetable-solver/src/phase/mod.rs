//! Solver phases
//!
//! - [`ConstructionHeuristicPhase`](construction::ConstructionHeuristicPhase):
//!   gives every unplaced lesson a time slot, room and teacher
//! - [`LocalSearchPhase`](localsearch::LocalSearchPhase): improves a
//!   complete timetable

pub mod construction;
pub mod localsearch;

use std::fmt::Debug;

use crate::error::SolverError;
use crate::scope::SolverScope;

/// A phase of the solving process.
///
/// Phases run in sequence on one [`SolverScope`]. Each phase changes the
/// working timetable through the scope and records a new best timetable
/// whenever it finds one.
pub trait Phase: Send + Debug {
    fn solve(&mut self, solver_scope: &mut SolverScope, phase_index: usize)
        -> Result<(), SolverError>;

    fn phase_type_name(&self) -> &'static str;
}

impl<P: Phase + ?Sized> Phase for Box<P> {
    fn solve(
        &mut self,
        solver_scope: &mut SolverScope,
        phase_index: usize,
    ) -> Result<(), SolverError> {
        (**self).solve(solver_scope, phase_index)
    }

    fn phase_type_name(&self) -> &'static str {
        (**self).phase_type_name()
    }
}
