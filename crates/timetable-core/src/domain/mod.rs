//! Planning domain for weekly lesson timetabling.
//!
//! Problem facts live in arenas on the [`Timetable`]; each [`Lesson`] refers
//! to them by index. Only the lesson's [`Assignment`] changes during a solve.

mod facts;
mod ids;
mod lesson;
mod timetable;
mod week_pattern;

#[cfg(test)]
mod tests;

pub use facts::{
    Qualification, QualificationLevel, Room, SchoolClass, SlotKey, Subject, Teacher, TimeSlot,
};
pub use ids::{RoomId, SchoolClassId, SubjectId, TeacherId, TermId, TimeSlotId};
pub use lesson::{Assignment, Lesson};
pub use timetable::Timetable;
pub use week_pattern::WeekPattern;
