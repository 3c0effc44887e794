use std::fmt;

use serde::{Deserialize, Serialize};

/// Alternating-week cycle of a lesson.
///
/// `A` and `B` lessons run every other week and may share a slot; `Every`
/// runs weekly and collides with both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeekPattern {
    #[default]
    Every,
    A,
    B,
}

impl WeekPattern {
    /// Returns true if lessons with these patterns can meet in the same week.
    pub fn overlaps(self, other: WeekPattern) -> bool {
        !matches!(
            (self, other),
            (WeekPattern::A, WeekPattern::B) | (WeekPattern::B, WeekPattern::A)
        )
    }

    /// Weekly load in half hours averaged over the A/B cycle.
    pub fn load_units(self) -> u32 {
        match self {
            WeekPattern::Every => 2,
            WeekPattern::A | WeekPattern::B => 1,
        }
    }
}

impl fmt::Display for WeekPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WeekPattern::Every => "EVERY",
            WeekPattern::A => "A",
            WeekPattern::B => "B",
        })
    }
}
