//! Forager for local search move selection.

use timetable_core::HardSoftScore;

/// Collects accepted moves of one step, up to a limit, and picks the best
/// of them.
///
/// Moves are tracked by their index in the step's batch.
#[derive(Debug, Clone)]
pub struct AcceptedCountForager {
    accepted_count_limit: usize,
    accepted: Vec<(usize, HardSoftScore)>,
}

impl AcceptedCountForager {
    /// A limit of zero is treated as one.
    pub fn new(accepted_count_limit: usize) -> Self {
        Self {
            accepted_count_limit: accepted_count_limit.max(1),
            accepted: Vec::new(),
        }
    }

    pub fn accepted_count_limit(&self) -> usize {
        self.accepted_count_limit
    }

    pub fn step_started(&mut self) {
        self.accepted.clear();
    }

    pub fn add_move_index(&mut self, index: usize, score: HardSoftScore) {
        self.accepted.push((index, score));
    }

    /// True once enough moves were accepted to stop looking at the batch.
    pub fn is_quit_early(&self) -> bool {
        self.accepted.len() >= self.accepted_count_limit
    }

    /// The best accepted move; the earliest one on ties.
    pub fn pick_move_index(&self) -> Option<(usize, HardSoftScore)> {
        self.accepted
            .iter()
            .copied()
            .fold(None, |best, (idx, score)| match best {
                Some((_, b)) if score <= b => best,
                _ => Some((idx, score)),
            })
    }
}

impl Default for AcceptedCountForager {
    fn default() -> Self {
        Self::new(4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_picks_best_accepted() {
        let mut forager = AcceptedCountForager::new(3);
        forager.step_started();
        assert_eq!(forager.pick_move_index(), None);

        forager.add_move_index(4, HardSoftScore::of(0, -7));
        forager.add_move_index(9, HardSoftScore::of(0, -3));
        assert!(!forager.is_quit_early());
        forager.add_move_index(11, HardSoftScore::of(0, -3));
        assert!(forager.is_quit_early());

        assert_eq!(forager.pick_move_index(), Some((9, HardSoftScore::of(0, -3))));
        forager.step_started();
        assert_eq!(forager.pick_move_index(), None);
    }

    #[test]
    fn test_zero_limit_clamped() {
        assert_eq!(AcceptedCountForager::new(0).accepted_count_limit(), 1);
    }
}
