//! Construction heuristic phase implementation.

use tracing::{debug, info, trace};

use crate::error::SolverError;
use crate::phase::Phase;
use crate::scope::{SolverScope, SolverState};
use crate::stats::PhaseStats;
use crate::termination::TerminationReason;

use super::{candidate_moves, placement_order, ConstructionForager};

/// Gives each lesson without a time slot its first placement.
///
/// All candidates for a lesson are scored in parallel, then the forager
/// picks one and it is applied before the next lesson is considered.
/// The phase runs to the end unless the solve is cancelled.
#[derive(Debug, Clone, Default)]
pub struct ConstructionHeuristicPhase {
    forager: ConstructionForager,
}

impl ConstructionHeuristicPhase {
    pub fn new(forager: ConstructionForager) -> Self {
        Self { forager }
    }

    pub fn forager(&self) -> ConstructionForager {
        self.forager
    }
}

impl Phase for ConstructionHeuristicPhase {
    fn solve(
        &mut self,
        solver_scope: &mut SolverScope,
        phase_index: usize,
    ) -> Result<(), SolverError> {
        solver_scope.set_state(SolverState::Constructing);
        let mut stats = PhaseStats::new(phase_index, "Construction Heuristic");

        let queue = placement_order(solver_scope.working_solution());
        let slots = solver_scope.working_solution().assignable_slots();
        info!(
            event = "phase_start",
            phase = stats.phase_type,
            phase_index = phase_index,
            unplaced = queue.len(),
            slots = slots.len(),
        );

        // Step, time and score limits wait until every lesson is placed;
        // only cancellation interrupts construction.
        for lesson in queue {
            if solver_scope.is_terminate_early() {
                solver_scope.mark_terminated(TerminationReason::Cancelled);
                debug!(event = "phase_interrupted", phase_index = phase_index);
                break;
            }

            let moves = candidate_moves(solver_scope.working_solution(), lesson, &slots);
            let scores = solver_scope.score_moves(&moves);
            stats.record_evaluations(moves.len());

            let current = solver_scope.current_score();
            let Some(picked) = self.forager.pick(current, &scores) else {
                debug!(event = "lesson_skipped", lesson = lesson, candidates = 0usize);
                continue;
            };

            let score = solver_scope.apply_move(&moves[picked])?;
            let step = solver_scope.increment_step_count();
            stats.record_step();
            stats.record_accepted();
            solver_scope.stats_mut().record_accepted();
            trace!(
                event = "step",
                step = step,
                lesson = lesson,
                candidates = moves.len(),
                score = %score,
            );
        }

        solver_scope.update_best_solution();

        let best_score = solver_scope
            .best_score()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "none".to_string());
        info!(
            event = "phase_end",
            phase = stats.phase_type,
            phase_index = phase_index,
            duration_ms = stats.elapsed_ms(),
            steps = stats.step_count,
            speed = stats.speed(),
            score = best_score,
        );
        Ok(())
    }

    fn phase_type_name(&self) -> &'static str {
        "ConstructionHeuristic"
    }
}
