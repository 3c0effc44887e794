//! The solver: runs phases over one timetable and reports the best result.

use std::fmt;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use timetable_core::{HardSoftScore, Score, Timetable};
use timetable_scoring::{
    timetable_constraints, ConstraintResult, ConstraintSet, ConstraintWeights,
    TimetableScoreDirector,
};
use tracing::info;

use crate::error::SolverError;
use crate::phase::Phase;
use crate::scope::{BestScoreListener, MoveEvaluator, SolverScope, SolverState};
use crate::stats::SolverStats;
use crate::termination::{Termination, TerminationReason};

/// How a finished solve turned out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolveOutcome {
    /// Every lesson is placed and no hard constraint is broken.
    Feasible,

    /// Hard constraints remain broken and the search ended for a reason
    /// other than its time limit.
    Infeasible,

    /// The time limit was reached before a feasible timetable was found.
    TimedOut,
}

impl SolveOutcome {
    fn classify(score: HardSoftScore, unplaced: usize, reason: TerminationReason) -> Self {
        if unplaced == 0 && score.is_feasible() {
            Self::Feasible
        } else if reason == TerminationReason::TimeLimit {
            Self::TimedOut
        } else {
            Self::Infeasible
        }
    }
}

/// Everything a solve produces.
#[derive(Debug, Clone)]
pub struct SolveResult {
    /// The best timetable found, carrying its score.
    pub solution: Timetable,
    pub score: HardSoftScore,
    /// Lessons still missing a time slot, or a room or teacher when
    /// unresourced lessons are not allowed.
    pub unplaced: usize,
    pub outcome: SolveOutcome,
    pub termination: TerminationReason,
    pub duration: Duration,
    pub stats: SolverStats,
    /// Per-constraint score and match count of `solution`.
    pub constraint_breakdown: Vec<ConstraintResult>,
}

impl SolveResult {
    pub fn is_feasible(&self) -> bool {
        self.outcome == SolveOutcome::Feasible
    }

    pub fn is_cancelled(&self) -> bool {
        self.termination == TerminationReason::Cancelled
    }
}

/// A configured solver for one timetable.
///
/// Built with [`SolverBuilder`](crate::SolverBuilder). Without any
/// termination a local search phase runs until cancelled.
pub struct Solver {
    pub(crate) phases: Vec<Box<dyn Phase>>,
    pub(crate) weights: ConstraintWeights,
    pub(crate) random_seed: Option<u64>,
    pub(crate) evaluator: MoveEvaluator,
    pub(crate) termination: Option<Box<dyn Termination>>,
    pub(crate) terminate_flag: Option<Arc<AtomicBool>>,
    pub(crate) best_score_listener: Option<BestScoreListener>,
    pub(crate) assert_scores: bool,
}

impl Solver {
    pub fn phase_count(&self) -> usize {
        self.phases.len()
    }

    /// Solves `timetable` and returns the best timetable found.
    ///
    /// Running out of time or being cancelled is not an error: the result
    /// carries the best timetable together with the reason the search
    /// stopped.
    pub fn solve(self, timetable: Timetable) -> Result<SolveResult, SolverError> {
        timetable.validate()?;
        let Solver {
            mut phases,
            weights,
            random_seed,
            evaluator,
            termination,
            terminate_flag,
            best_score_listener,
            assert_scores,
        } = self;

        info!(
            event = "solve_start",
            term_id = %timetable.term_id,
            lesson_count = timetable.lessons.len(),
            slot_count = timetable.assignable_slots().len(),
            room_count = timetable.rooms.len(),
            teacher_count = timetable.teachers.len(),
            phase_count = phases.len(),
            random_seed = ?random_seed,
        );

        let director = TimetableScoreDirector::new(timetable, timetable_constraints(&weights));
        let mut scope = match random_seed {
            Some(seed) => SolverScope::with_seed(director, seed),
            None => SolverScope::new(director),
        }
        .with_evaluator(evaluator)
        .with_score_assertions(assert_scores);
        if let Some(termination) = termination {
            scope = scope.with_termination(termination);
        }
        if let Some(listener) = best_score_listener {
            scope = scope.with_best_score_listener(listener);
        }
        if let Some(flag) = terminate_flag {
            scope.set_terminate_early_flag(flag);
        }

        scope.start_solving();
        for (index, phase) in phases.iter_mut().enumerate() {
            if scope.should_terminate() {
                break;
            }
            phase.solve(&mut scope, index)?;
        }
        scope.update_best_solution();
        scope.mark_terminated(TerminationReason::Completed);

        let reason = scope
            .terminated_by()
            .unwrap_or(TerminationReason::Completed);
        let unplaced = scope
            .best_solution()
            .unwrap_or_else(|| scope.working_solution())
            .unassigned_count();
        let best = scope.best_score().unwrap_or_else(|| scope.current_score());
        let outcome = SolveOutcome::classify(best, unplaced, reason);
        scope.set_state(SolverState::Terminated(outcome));

        let stats = scope.stats().clone();
        let duration = stats.elapsed();
        let moves_per_second = stats.moves_per_second();
        let (solution, score) = scope.take_best_or_working_solution();
        let constraint_breakdown = timetable_constraints(&weights).evaluate_each(&solution);

        info!(
            event = "solve_end",
            score = %score,
            unplaced = unplaced,
            outcome = ?outcome,
            termination = %reason,
            duration_ms = duration.as_millis() as u64,
            steps = stats.step_count,
            moves_evaluated = stats.moves_evaluated,
            moves_accepted = stats.moves_accepted,
            score_calculations = stats.score_calculations,
            moves_per_second = moves_per_second as u64,
        );

        Ok(SolveResult {
            solution,
            score,
            unplaced,
            outcome,
            termination: reason,
            duration,
            stats,
            constraint_breakdown,
        })
    }
}

impl fmt::Debug for Solver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Solver")
            .field("phases", &self.phases)
            .field("random_seed", &self.random_seed)
            .field("evaluator", &self.evaluator)
            .field("termination", &self.termination)
            .field("assert_scores", &self.assert_scores)
            .finish()
    }
}

#[cfg(test)]
mod tests;
