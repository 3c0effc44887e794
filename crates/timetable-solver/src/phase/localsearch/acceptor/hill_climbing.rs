use rand::rngs::StdRng;
use timetable_core::Score;

use super::Acceptor;

/// Accepts only strictly improving moves.
#[derive(Debug, Clone, Default)]
pub struct HillClimbingAcceptor;

impl HillClimbingAcceptor {
    pub fn new() -> Self {
        Self
    }
}

impl<Sc: Score> Acceptor<Sc> for HillClimbingAcceptor {
    fn is_accepted(&mut self, last_step_score: &Sc, move_score: &Sc, _rng: &mut StdRng) -> bool {
        move_score > last_step_score
    }
}
