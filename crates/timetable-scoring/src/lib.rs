//! Constraint evaluation for lesson timetables.
//!
//! Constraints come in three shapes:
//! - unary: judged per lesson (availability, capacity, qualification)
//! - pairwise: judged per pair of lessons sharing a teacher, room or class
//!   on the same day with overlapping week patterns
//! - teacher load: judged per teacher over the whole week
//!
//! [`ConstraintSet`] sums a tuple of constraints. The
//! [`TimetableScoreDirector`] indexes the working timetable so that a move
//! only re-evaluates the lessons it can interact with.

pub mod constraint;
pub mod constraint_set;
pub mod constraints;
pub mod director;
pub mod weights;

pub use constraint::{ConstraintKind, ConstraintResult, Join, LessonView, TimetableConstraint};
pub use constraint_set::ConstraintSet;
pub use constraints::{timetable_constraints, TimetableConstraints};
pub use director::{DirectorError, LessonChange, TimetableScoreDirector};
pub use weights::ConstraintWeights;
