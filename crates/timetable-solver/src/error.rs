//! Errors raised while building or running a solver.

use thiserror::Error;
use timetable_core::TimetableError;
use timetable_scoring::DirectorError;

#[derive(Debug, Error)]
pub enum SolverError {
    /// The timetable failed validation before solving started.
    #[error(transparent)]
    Domain(#[from] TimetableError),

    /// The score director rejected a move or detected score drift.
    #[error("score director error: {0}")]
    Director(#[from] DirectorError),

    #[error("invalid solver configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to build move thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
