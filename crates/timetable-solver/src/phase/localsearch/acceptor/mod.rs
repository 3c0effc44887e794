//! Acceptors for local search move acceptance.
//!
//! Acceptors compare a candidate's score with the last step's score and
//! decide whether the move may be taken. Anything other than strict hill
//! climbing lets the search walk through worse timetables to escape a local
//! optimum.

mod hill_climbing;
mod late_acceptance;
mod simulated_annealing;

use std::fmt::Debug;

use rand::rngs::StdRng;
use timetable_core::{HardSoftScore, Score};

pub use hill_climbing::HillClimbingAcceptor;
pub use late_acceptance::LateAcceptanceAcceptor;
pub use simulated_annealing::SimulatedAnnealingAcceptor;

/// Decides whether a scored move is admissible.
pub trait Acceptor<Sc: Score = HardSoftScore>: Send + Debug {
    /// Returns true if a move resulting in `move_score` should be accepted,
    /// given the previous step's score.
    fn is_accepted(&mut self, last_step_score: &Sc, move_score: &Sc, rng: &mut StdRng) -> bool;

    fn phase_started(&mut self, _initial_score: &Sc) {}

    fn phase_ended(&mut self) {}

    /// Called after every step with the working score it ended on.
    fn step_ended(&mut self, _step_score: &Sc) {}
}

impl<Sc: Score, A: Acceptor<Sc> + ?Sized> Acceptor<Sc> for Box<A> {
    fn is_accepted(&mut self, last_step_score: &Sc, move_score: &Sc, rng: &mut StdRng) -> bool {
        (**self).is_accepted(last_step_score, move_score, rng)
    }

    fn phase_started(&mut self, initial_score: &Sc) {
        (**self).phase_started(initial_score)
    }

    fn phase_ended(&mut self) {
        (**self).phase_ended()
    }

    fn step_ended(&mut self, step_score: &Sc) {
        (**self).step_ended(step_score)
    }
}

#[cfg(test)]
mod tests;
