//! Late acceptance acceptor.

use rand::rngs::StdRng;
use timetable_core::{HardSoftScore, Score};

use super::Acceptor;

/// Accepts a move that improves on the last step, or that is no worse than
/// the step score recorded `late_acceptance_size` steps ago.
///
/// ```
/// use timetable_solver::LateAcceptanceAcceptor;
///
/// let acceptor: LateAcceptanceAcceptor = LateAcceptanceAcceptor::new(400);
/// assert_eq!(acceptor.size(), 400);
/// ```
#[derive(Debug, Clone)]
pub struct LateAcceptanceAcceptor<Sc: Score = HardSoftScore> {
    late_acceptance_size: usize,
    score_history: Vec<Option<Sc>>,
    current_index: usize,
}

impl<Sc: Score> LateAcceptanceAcceptor<Sc> {
    /// A size of zero is treated as one.
    pub fn new(late_acceptance_size: usize) -> Self {
        let late_acceptance_size = late_acceptance_size.max(1);
        Self {
            late_acceptance_size,
            score_history: vec![None; late_acceptance_size],
            current_index: 0,
        }
    }

    pub fn size(&self) -> usize {
        self.late_acceptance_size
    }
}

impl<Sc: Score> Default for LateAcceptanceAcceptor<Sc> {
    fn default() -> Self {
        Self::new(400)
    }
}

impl<Sc: Score> Acceptor<Sc> for LateAcceptanceAcceptor<Sc> {
    fn is_accepted(&mut self, last_step_score: &Sc, move_score: &Sc, _rng: &mut StdRng) -> bool {
        if move_score > last_step_score {
            return true;
        }
        match &self.score_history[self.current_index] {
            Some(late_score) => move_score >= late_score,
            None => true,
        }
    }

    fn phase_started(&mut self, initial_score: &Sc) {
        self.score_history.fill(Some(*initial_score));
        self.current_index = 0;
    }

    fn step_ended(&mut self, step_score: &Sc) {
        self.score_history[self.current_index] = Some(*step_score);
        self.current_index = (self.current_index + 1) % self.late_acceptance_size;
    }
}
