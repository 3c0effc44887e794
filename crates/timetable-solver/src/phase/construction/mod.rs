//! Construction heuristic phase
//!
//! Places lessons one at a time, most constrained first, trying every
//! slot × room × teacher combination for the lesson at hand.

mod forager;
mod phase;
mod placer;

pub use forager::ConstructionForager;
pub use phase::ConstructionHeuristicPhase;
pub use placer::{candidate_moves, placement_order};

#[cfg(test)]
mod tests;
