use std::fmt::{Debug, Display};
use std::ops::{Add, Neg, Sub};

use thiserror::Error;

/// Quality of a timetable. Higher is better.
///
/// Scores are ordered level by level, most important level first.
pub trait Score:
    Copy
    + Debug
    + Display
    + Default
    + Send
    + Sync
    + PartialEq
    + Eq
    + PartialOrd
    + Ord
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + 'static
{
    /// True when no hard rule is broken.
    fn is_feasible(&self) -> bool;

    /// Collapses the score into one number, used by temperature-based acceptors.
    fn to_scalar(&self) -> f64;

    fn is_better_than(&self, other: &Self) -> bool {
        self > other
    }
}

/// A score with a textual form, as used in configuration files.
pub trait ParseableScore: Score {
    /// Parses e.g. `"-1hard/-20soft"`.
    fn parse(s: &str) -> Result<Self, ScoreParseError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid score: {message}")]
pub struct ScoreParseError {
    pub message: String,
}
