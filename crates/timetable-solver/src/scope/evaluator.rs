//! Parallel scoring of candidate moves.

use std::sync::Arc;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use timetable_config::MoveThreadCount;
use timetable_core::HardSoftScore;
use timetable_scoring::TimetableScoreDirector;

use crate::error::SolverError;
use crate::heuristic::LessonMove;

/// Where candidate moves are scored.
///
/// Scoring only reads the director, so candidates fan out across threads
/// while the chosen move is applied on the solving thread.
#[derive(Debug, Clone, Default)]
pub enum MoveEvaluator {
    /// Score on the calling thread.
    Sequential,

    /// Score on rayon's global pool.
    #[default]
    Global,

    /// Score on a dedicated pool.
    Pool(Arc<ThreadPool>),
}

impl MoveEvaluator {
    pub fn from_thread_count(count: &MoveThreadCount) -> Result<Self, SolverError> {
        match count {
            MoveThreadCount::Auto => Ok(Self::Global),
            MoveThreadCount::None | MoveThreadCount::Count(1) => Ok(Self::Sequential),
            MoveThreadCount::Count(0) => Err(SolverError::InvalidConfig(
                "move_thread_count must be at least 1".to_string(),
            )),
            MoveThreadCount::Count(n) => {
                let pool = ThreadPoolBuilder::new()
                    .num_threads(*n)
                    .thread_name(|i| format!("timetable-move-{}", i))
                    .build()?;
                Ok(Self::Pool(Arc::new(pool)))
            }
        }
    }

    /// Scores each move against the director's working timetable, keeping
    /// the input order.
    pub fn score_all(
        &self,
        director: &TimetableScoreDirector,
        moves: &[LessonMove],
    ) -> Vec<HardSoftScore> {
        let score = |m: &LessonMove| director.score_if(m.changes());
        match self {
            Self::Sequential => moves.iter().map(score).collect(),
            Self::Global => moves.par_iter().map(score).collect(),
            Self::Pool(pool) => pool.install(|| moves.par_iter().map(score).collect()),
        }
    }
}
