//! Score types for representing timetable quality
//!
//! A timetable is judged by a two-level [`HardSoftScore`]: hard rules decide
//! feasibility, soft preferences break ties between feasible timetables.

#[macro_use]
mod macros;

mod hard_soft;
mod traits;


pub use hard_soft::HardSoftScore;
pub use traits::{ParseableScore, Score, ScoreParseError};
