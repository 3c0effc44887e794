//! Local search phase implementation.

use std::fmt;
use std::time::{Duration, Instant};

use tracing::{debug, info, trace};

use crate::error::SolverError;
use crate::heuristic::{MoveSelector, UnionMoveSelector};
use crate::phase::Phase;
use crate::scope::{SolverScope, SolverState};
use crate::stats::PhaseStats;
use crate::termination::Termination;

use super::{AcceptedCountForager, Acceptor, LateAcceptanceAcceptor};

const PROGRESS_INTERVAL: Duration = Duration::from_secs(1);

/// Improves a complete timetable until a termination fires.
///
/// Per step:
/// 1. sample `move_batch_size` moves from the selector
/// 2. score the whole batch in parallel
/// 3. feed the scores to the acceptor in batch order, stopping early once
///    the forager is satisfied or a cancel request arrives
/// 4. apply the forager's pick
///
/// A step without an accepted move still counts as a step, so unimproved
/// step limits keep ticking. The phase ends early only when the selector
/// cannot produce any move.
pub struct LocalSearchPhase {
    move_selector: Box<dyn MoveSelector>,
    acceptor: Box<dyn Acceptor>,
    forager: AcceptedCountForager,
    move_batch_size: usize,
    termination: Option<Box<dyn Termination>>,
}

impl LocalSearchPhase {
    pub const DEFAULT_MOVE_BATCH_SIZE: usize = 64;

    pub fn new(
        move_selector: Box<dyn MoveSelector>,
        acceptor: Box<dyn Acceptor>,
        forager: AcceptedCountForager,
    ) -> Self {
        Self {
            move_selector,
            acceptor,
            forager,
            move_batch_size: Self::DEFAULT_MOVE_BATCH_SIZE,
            termination: None,
        }
    }

    pub fn with_move_batch_size(mut self, size: usize) -> Self {
        self.move_batch_size = size.max(1);
        self
    }

    /// Ends this phase, but not the solve, when `termination` fires.
    pub fn with_termination(mut self, termination: Box<dyn Termination>) -> Self {
        self.termination = Some(termination);
        self
    }

    fn phase_terminated(&self, solver_scope: &SolverScope) -> bool {
        self.termination
            .as_ref()
            .and_then(|t| t.check(solver_scope))
            .inspect(|reason| debug!(event = "phase_termination", reason = %reason))
            .is_some()
    }
}

impl Default for LocalSearchPhase {
    /// Change and swap moves under late acceptance.
    fn default() -> Self {
        Self::new(
            Box::new(UnionMoveSelector::change_and_swap()),
            Box::new(LateAcceptanceAcceptor::default()),
            AcceptedCountForager::default(),
        )
    }
}

impl fmt::Debug for LocalSearchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalSearchPhase")
            .field("move_selector", &self.move_selector)
            .field("acceptor", &self.acceptor)
            .field("forager", &self.forager)
            .field("move_batch_size", &self.move_batch_size)
            .field("termination", &self.termination)
            .finish()
    }
}

impl Phase for LocalSearchPhase {
    fn solve(
        &mut self,
        solver_scope: &mut SolverScope,
        phase_index: usize,
    ) -> Result<(), SolverError> {
        solver_scope.set_state(SolverState::LocalSearch);
        let mut stats = PhaseStats::new(phase_index, "Local Search");
        let slots = solver_scope.working_solution().assignable_slots();

        let mut last_step_score = solver_scope.current_score();
        self.acceptor.phase_started(&last_step_score);
        solver_scope.update_best_solution();

        info!(
            event = "phase_start",
            phase = stats.phase_type,
            phase_index = phase_index,
            score = %last_step_score,
        );

        let mut last_progress = Instant::now();
        loop {
            if solver_scope.should_terminate() || self.phase_terminated(solver_scope) {
                break;
            }

            let moves = solver_scope.sample_moves(
                self.move_selector.as_ref(),
                &slots,
                self.move_batch_size,
            );
            if moves.is_empty() {
                debug!(event = "no_moves", phase_index = phase_index);
                break;
            }
            let scores = solver_scope.score_moves(&moves);
            stats.record_evaluations(moves.len());

            self.forager.step_started();
            for (idx, score) in scores.iter().enumerate() {
                if solver_scope.is_terminate_early() {
                    break;
                }
                if self
                    .acceptor
                    .is_accepted(&last_step_score, score, solver_scope.rng())
                {
                    self.forager.add_move_index(idx, *score);
                    if self.forager.is_quit_early() {
                        break;
                    }
                }
            }

            let picked = self.forager.pick_move_index();
            if let Some((idx, _)) = picked {
                last_step_score = solver_scope.apply_move(&moves[idx])?;
                stats.record_accepted();
                solver_scope.stats_mut().record_accepted();
            }
            let step = solver_scope.increment_step_count();
            stats.record_step();
            self.acceptor.step_ended(&last_step_score);

            let improved = solver_scope.update_best_solution();
            trace!(
                event = "step",
                step = step,
                score = %last_step_score,
                accepted = picked.is_some(),
                new_best = improved,
            );

            if last_progress.elapsed() >= PROGRESS_INTERVAL {
                debug!(
                    event = "progress",
                    steps = stats.step_count,
                    speed = stats.speed(),
                    score = ?solver_scope.best_score(),
                );
                last_progress = Instant::now();
            }
        }

        self.acceptor.phase_ended();

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
            moves_accepted = stats.moves_accepted,
            speed = stats.speed(),
            score = best_score,
        );
        Ok(())
    }

    fn phase_type_name(&self) -> &'static str {
        "LocalSearch"
    }
}
