//! Local search phase
//!
//! Each step samples a batch of moves, scores the batch in parallel, lets
//! the acceptor filter it and the forager pick one accepted move to apply.

mod acceptor;
mod forager;
mod phase;

pub use acceptor::{
    Acceptor, HillClimbingAcceptor, LateAcceptanceAcceptor, SimulatedAnnealingAcceptor,
};
pub use forager::AcceptedCountForager;
pub use phase::LocalSearchPhase;
