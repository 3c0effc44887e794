use timetable_config::ConstructionHeuristicType;
use timetable_core::HardSoftScore;

/// Picks one of a lesson's scored candidate placements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConstructionForager {
    /// The first candidate, in enumeration order, that adds no hard
    /// penalty. Falls back to the least bad candidate.
    #[default]
    FirstFit,

    /// The best-scoring candidate; the earliest one on ties.
    BestFit,
}

impl ConstructionForager {
    /// Returns the index of the chosen candidate, or `None` when there are
    /// no candidates.
    pub fn pick(&self, current: HardSoftScore, scores: &[HardSoftScore]) -> Option<usize> {
        if let Self::FirstFit = self {
            if let Some(idx) = scores.iter().position(|s| s.hard() >= current.hard()) {
                return Some(idx);
            }
        }
        best_index(scores)
    }
}

impl From<ConstructionHeuristicType> for ConstructionForager {
    fn from(kind: ConstructionHeuristicType) -> Self {
        match kind {
            ConstructionHeuristicType::FirstFit => Self::FirstFit,
            ConstructionHeuristicType::BestFit => Self::BestFit,
        }
    }
}

fn best_index(scores: &[HardSoftScore]) -> Option<usize> {
    let mut best: Option<(usize, HardSoftScore)> = None;
    for (idx, &score) in scores.iter().enumerate() {
        if best.map_or(true, |(_, b)| score > b) {
            best = Some((idx, score));
        }
    }
    best.map(|(idx, _)| idx)
}
