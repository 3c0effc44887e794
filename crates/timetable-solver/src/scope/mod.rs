//! Solver-level scope.

mod evaluator;

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use timetable_core::{HardSoftScore, Score, Timetable};
use timetable_scoring::TimetableScoreDirector;

use crate::error::SolverError;
use crate::heuristic::{LessonMove, MoveSelector};
use crate::solver::SolveOutcome;
use crate::stats::SolverStats;
use crate::termination::{Termination, TerminationReason};

pub use evaluator::MoveEvaluator;

/// Callback invoked whenever a new best score is found.
pub type BestScoreListener = Box<dyn FnMut(HardSoftScore) + Send>;

/// Where a solve is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolverState {
    #[default]
    Idle,
    Constructing,
    LocalSearch,
    Terminated(SolveOutcome),
}

/// Everything one solve carries from phase to phase.
pub struct SolverScope {
    director: TimetableScoreDirector,
    best_solution: Option<Timetable>,
    best_score: Option<HardSoftScore>,
    best_unplaced: usize,
    rng: StdRng,
    evaluator: MoveEvaluator,
    start_time: Option<Instant>,
    total_step_count: u64,
    last_improvement_step: u64,
    last_improvement_time: Option<Instant>,
    terminate_early_flag: Option<Arc<AtomicBool>>,
    termination: Option<Box<dyn Termination>>,
    terminated_by: Option<TerminationReason>,
    state: SolverState,
    stats: SolverStats,
    assert_scores: bool,
    best_score_listener: Option<BestScoreListener>,
}

impl SolverScope {
    pub fn new(director: TimetableScoreDirector) -> Self {
        Self::with_rng(director, StdRng::from_os_rng())
    }

    pub fn with_seed(director: TimetableScoreDirector, seed: u64) -> Self {
        Self::with_rng(director, StdRng::seed_from_u64(seed))
    }

    fn with_rng(director: TimetableScoreDirector, rng: StdRng) -> Self {
        Self {
            director,
            best_solution: None,
            best_score: None,
            best_unplaced: usize::MAX,
            rng,
            evaluator: MoveEvaluator::default(),
            start_time: None,
            total_step_count: 0,
            last_improvement_step: 0,
            last_improvement_time: None,
            terminate_early_flag: None,
            termination: None,
            terminated_by: None,
            state: SolverState::Idle,
            stats: SolverStats::default(),
            assert_scores: false,
            best_score_listener: None,
        }
    }

    pub fn with_evaluator(mut self, evaluator: MoveEvaluator) -> Self {
        self.evaluator = evaluator;
        self
    }

    pub fn with_termination(mut self, termination: Box<dyn Termination>) -> Self {
        self.termination = Some(termination);
        self
    }

    /// Verifies the incremental score after every applied move.
    pub fn with_score_assertions(mut self, enabled: bool) -> Self {
        self.assert_scores = enabled;
        self
    }

    pub fn with_best_score_listener(mut self, listener: BestScoreListener) -> Self {
        self.best_score_listener = Some(listener);
        self
    }

    pub fn set_terminate_early_flag(&mut self, flag: Arc<AtomicBool>) {
        self.terminate_early_flag = Some(flag);
    }

    pub fn start_solving(&mut self) {
        let now = Instant::now();
        self.start_time = Some(now);
        self.last_improvement_time = Some(now);
        self.total_step_count = 0;
        self.last_improvement_step = 0;
        self.stats.start();
    }

    pub fn elapsed(&self) -> Option<Duration> {
        self.start_time.map(|t| t.elapsed())
    }

    pub fn time_since_improvement(&self) -> Option<Duration> {
        self.last_improvement_time.map(|t| t.elapsed())
    }

    pub fn score_director(&self) -> &TimetableScoreDirector {
        &self.director
    }

    pub fn working_solution(&self) -> &Timetable {
        self.director.working_solution()
    }

    pub fn current_score(&self) -> HardSoftScore {
        self.director.score()
    }

    pub fn best_solution(&self) -> Option<&Timetable> {
        self.best_solution.as_ref()
    }

    pub fn best_score(&self) -> Option<HardSoftScore> {
        self.best_score
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    pub fn state(&self) -> SolverState {
        self.state
    }

    pub fn set_state(&mut self, state: SolverState) {
        self.state = state;
    }

    pub fn stats(&self) -> &SolverStats {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut SolverStats {
        &mut self.stats
    }

    pub fn total_step_count(&self) -> u64 {
        self.total_step_count
    }

    pub fn steps_since_improvement(&self) -> u64 {
        self.total_step_count - self.last_improvement_step
    }

    pub fn increment_step_count(&mut self) -> u64 {
        self.total_step_count += 1;
        self.stats.record_step();
        self.total_step_count
    }

    pub fn terminated_by(&self) -> Option<TerminationReason> {
        self.terminated_by
    }

    /// Draws up to `count` moves from `selector`; fewer when it runs dry.
    pub fn sample_moves(
        &mut self,
        selector: &dyn MoveSelector,
        slots: &[usize],
        count: usize,
    ) -> Vec<LessonMove> {
        let timetable = self.director.working_solution();
        let rng = &mut self.rng;
        (0..count)
            .map_while(|_| selector.sample(timetable, slots, rng))
            .collect()
    }

    /// Scores candidate moves against the working timetable.
    pub fn score_moves(&mut self, moves: &[LessonMove]) -> Vec<HardSoftScore> {
        self.stats.record_evaluations(moves.len());
        self.evaluator.score_all(&self.director, moves)
    }

    /// Commits a move and returns the new working score.
    pub fn apply_move(&mut self, m: &LessonMove) -> Result<HardSoftScore, SolverError> {
        let score = self.director.apply(m.changes())?;
        if self.assert_scores {
            self.director.verify()?;
        }
        Ok(score)
    }

    /// Keeps a copy of the working timetable if it beats the best so far.
    ///
    /// A timetable with fewer lessons lacking a time slot always wins, so a
    /// half-built timetable never outranks a complete one by having fewer
    /// penalties. Returns true when the best timetable was replaced.
    pub fn update_best_solution(&mut self) -> bool {
        let current = self.director.score();
        let unplaced = self
            .working_solution()
            .lessons
            .iter()
            .filter(|l| l.time_slot.is_none())
            .count();
        let is_better = match self.best_score {
            None => true,
            Some(best) => {
                unplaced < self.best_unplaced
                    || (unplaced == self.best_unplaced && current.is_better_than(&best))
            }
        };
        if !is_better {
            return false;
        }

        self.best_solution = Some(self.director.clone_solution());
        self.best_score = Some(current);
        self.best_unplaced = unplaced;
        self.last_improvement_step = self.total_step_count;
        self.last_improvement_time = Some(Instant::now());
        self.stats.record_improvement();
        if let Some(listener) = self.best_score_listener.as_mut() {
            listener(current);
        }
        true
    }

    pub fn is_terminate_early(&self) -> bool {
        self.terminate_early_flag
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }

    /// Returns true once cancellation or the solver termination fires, and
    /// remembers why.
    pub fn should_terminate(&mut self) -> bool {
        if self.terminated_by.is_some() {
            return true;
        }
        let scope: &SolverScope = self;
        let reason = if scope.is_terminate_early() {
            Some(TerminationReason::Cancelled)
        } else {
            scope.termination.as_ref().and_then(|t| t.check(scope))
        };
        self.terminated_by = reason;
        reason.is_some()
    }

    /// Marks the solve as finished, keeping an earlier reason if one exists.
    pub fn mark_terminated(&mut self, reason: TerminationReason) {
        self.terminated_by.get_or_insert(reason);
    }

    /// Hands back the best timetable, or the working one when no best was
    /// recorded, with its score.
    pub fn take_best_or_working_solution(self) -> (Timetable, HardSoftScore) {
        match (self.best_solution, self.best_score) {
            (Some(solution), Some(score)) => (solution, score),
            _ => {
                let score = self.director.score();
                (self.director.into_solution(), score)
            }
        }
    }
}

impl fmt::Debug for SolverScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SolverScope")
            .field("state", &self.state)
            .field("current_score", &self.director.score())
            .field("best_score", &self.best_score)
            .field("total_step_count", &self.total_step_count)
            .field("terminated_by", &self.terminated_by)
            .finish()
    }
}
