//! Timetable Core - Score types and planning domain for lesson timetabling
//!
//! This crate provides the fundamental abstractions shared by the engine:
//! - Score types for representing timetable quality
//! - Problem facts (time slots, rooms, subjects, classes, teachers)
//! - The [`Lesson`] planning entity and the [`Timetable`] planning solution
//! - Error types for domain and state failures

pub mod domain;
pub mod error;
pub mod score;

pub use domain::{
    Assignment, Lesson, Qualification, QualificationLevel, Room, RoomId, SchoolClass,
    SchoolClassId, SlotKey, Subject, SubjectId, Teacher, TeacherId, TermId, TimeSlot, TimeSlotId,
    Timetable, WeekPattern,
};
pub use error::{Result, TimetableError};
pub use score::{HardSoftScore, ParseableScore, Score, ScoreParseError};
