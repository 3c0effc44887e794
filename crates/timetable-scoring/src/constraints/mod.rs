//! The timetabling rules.
//!
//! Hard rules each cost one hard point per violation; soft rules trade in
//! soft points. Every weight can be scaled through [`ConstraintWeights`].

mod availability;
mod conflicts;
mod resources;
mod school_class;
mod teacher_day;


pub use availability::{TeacherAvailability, TeacherPreferredSlots};
pub use conflicts::SlotConflict;
pub use resources::{RoomCapacity, TeacherQualification};
pub use school_class::{ClassTeacherFirstPeriod, SubjectDistribution};
pub use teacher_day::{MinimizeTeacherGaps, TeacherMaxHours};

use timetable_core::HardSoftScore;

use crate::weights::ConstraintWeights;

pub const TEACHER_CONFLICT: &str = "teacherConflict";
pub const ROOM_CONFLICT: &str = "roomConflict";
pub const SCHOOL_CLASS_CONFLICT: &str = "schoolClassConflict";
pub const TEACHER_AVAILABILITY: &str = "teacherAvailability";
pub const ROOM_CAPACITY: &str = "roomCapacity";
pub const TEACHER_QUALIFICATION: &str = "teacherQualification";
pub const TEACHER_MAX_HOURS: &str = "teacherMaxHours";
pub const TEACHER_PREFERRED_SLOTS: &str = "teacherPreferredSlots";
pub const MINIMIZE_TEACHER_GAPS: &str = "minimizeTeacherGaps";
pub const SUBJECT_DISTRIBUTION: &str = "subjectDistribution";
pub const CLASS_TEACHER_FIRST_PERIOD: &str = "classTeacherFirstPeriod";

/// The full rule set, hard rules first.
pub type TimetableConstraints = (
    SlotConflict,
    SlotConflict,
    SlotConflict,
    TeacherAvailability,
    RoomCapacity,
    TeacherQualification,
    TeacherMaxHours,
    TeacherPreferredSlots,
    MinimizeTeacherGaps,
    SubjectDistribution,
    ClassTeacherFirstPeriod,
);

/// Builds the full rule set with the given weight multipliers.
pub fn timetable_constraints(weights: &ConstraintWeights) -> TimetableConstraints {
    let hard = |name: &str| HardSoftScore::of_hard(-i64::from(weights.get_or_default(name)));
    let soft = |name: &str| HardSoftScore::of_soft(-i64::from(weights.get_or_default(name)));

    (
        SlotConflict::teacher(hard(TEACHER_CONFLICT)),
        SlotConflict::room(hard(ROOM_CONFLICT)),
        SlotConflict::school_class(hard(SCHOOL_CLASS_CONFLICT)),
        TeacherAvailability::new(hard(TEACHER_AVAILABILITY)),
        RoomCapacity::new(hard(ROOM_CAPACITY)),
        TeacherQualification::new(hard(TEACHER_QUALIFICATION)),
        TeacherMaxHours::new(hard(TEACHER_MAX_HOURS)),
        TeacherPreferredSlots::new(-soft(TEACHER_PREFERRED_SLOTS)),
        MinimizeTeacherGaps::new(soft(MINIMIZE_TEACHER_GAPS)),
        SubjectDistribution::new(soft(SUBJECT_DISTRIBUTION)),
        ClassTeacherFirstPeriod::new(soft(CLASS_TEACHER_FIRST_PERIOD)),
    )
}
