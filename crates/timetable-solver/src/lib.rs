//! Timetable Solver Engine
//!
//! This crate turns an assembled [`Timetable`](timetable_core::Timetable)
//! into a scored schedule:
//! - [`ConstructionHeuristicPhase`] places every lesson once
//! - [`LocalSearchPhase`] improves the placement with change and swap moves
//! - acceptors, foragers and terminations steer the search
//! - [`SolverBuilder`] wires all of it from a
//!   [`SolverConfig`](timetable_config::SolverConfig)
//!
//! Moves are scored in parallel with rayon against a shared score director
//! and applied serially on the solving thread.

pub mod builder;
pub mod error;
pub mod heuristic;
pub mod phase;
pub mod scope;
pub mod solver;
pub mod stats;
pub mod termination;

pub use builder::{AcceptorBuilder, SolverBuilder};
pub use error::SolverError;
pub use heuristic::{
    ChangeMoveSelector, LessonMove, MoveSelector, SwapMoveSelector, UnionMoveSelector,
};
pub use phase::construction::{ConstructionForager, ConstructionHeuristicPhase};
pub use phase::localsearch::{
    AcceptedCountForager, Acceptor, HillClimbingAcceptor, LateAcceptanceAcceptor,
    LocalSearchPhase, SimulatedAnnealingAcceptor,
};
pub use phase::Phase;
pub use scope::{BestScoreListener, MoveEvaluator, SolverScope, SolverState};
pub use solver::{SolveOutcome, SolveResult, Solver};
pub use stats::{PhaseStats, SolverStats};
pub use termination::{
    BestScoreTermination, ExternalTermination, OrTermination, StepCountTermination, Termination,
    TerminationReason, TimeTermination, UnimprovedStepCountTermination,
    UnimprovedTimeTermination,
};
