//! Weekly lesson timetabling for a school term.
//!
//! The pieces, in the order a solve uses them:
//! - [`assembler`] turns a [`SchedulingInput`] snapshot into a [`Timetable`]
//! - [`timetable_solver`] places and improves the lessons
//! - [`extractor`] turns the solved timetable into [`LessonRecord`]s
//! - [`service`] runs all of it as background jobs, one per term
//!
//! # Example
//!
//! ```
//! use timetable::HardSoftScore;
//!
//! let score = HardSoftScore::of(0, -12);
//! assert_eq!(score.to_string(), "0hard/-12soft");
//! ```

pub mod assembler;
pub mod extractor;
pub mod input;
pub mod service;
pub mod store;

pub use assembler::{assemble, ProblemAssemblyError};
pub use extractor::{extract, LessonRecord, UnresolvedAssignmentError};
pub use input::{
    AvailabilityType, CurriculumRequirement, InputError, RoomInput, SchedulingInput,
    SchoolClassInput, SubjectInput, TeacherAvailabilityInput, TeacherInput,
    TeacherQualificationInput, TimeSlotInput,
};
pub use service::{JobId, JobState, SolveError, SolveStatus, SolverManager};
pub use store::{BoxError, InMemoryLessonSink, InMemoryProblemSource, LessonSink, ProblemSource};

pub use timetable_config::SolverConfig;
pub use timetable_core::{HardSoftScore, Score, TermId, Timetable};
pub use timetable_solver::{SolveOutcome, SolveResult, SolverBuilder};
