use timetable_core::{HardSoftScore, Timetable};

use crate::constraint::{ConstraintKind, LessonView, TimetableConstraint};

use super::{ROOM_CAPACITY, TEACHER_QUALIFICATION};

/// A class larger than the room it is placed in.
///
/// Skipped when the room is unassigned or has no recorded capacity.
#[derive(Debug, Clone)]
pub struct RoomCapacity {
    weight: HardSoftScore,
}

impl RoomCapacity {
    pub fn new(weight: HardSoftScore) -> Self {
        Self { weight }
    }
}

impl TimetableConstraint for RoomCapacity {
    fn name(&self) -> &str {
        ROOM_CAPACITY
    }

    fn is_hard(&self) -> bool {
        true
    }

    fn weight(&self) -> HardSoftScore {
        self.weight
    }

    fn kind(&self) -> ConstraintKind {
        ConstraintKind::Unary
    }

    fn lesson_matches(&self, timetable: &Timetable, lesson: LessonView<'_>) -> i64 {
        let Some(capacity) = lesson
            .assignment
            .room
            .and_then(|room| timetable.rooms[room].capacity)
        else {
            return 0;
        };
        let students = timetable.school_classes[lesson.lesson.school_class].student_count;
        i64::from(students > capacity)
    }
}

/// A teacher without a qualification for the subject at the class's grade.
#[derive(Debug, Clone)]
pub struct TeacherQualification {
    weight: HardSoftScore,
}

impl TeacherQualification {
    pub fn new(weight: HardSoftScore) -> Self {
        Self { weight }
    }
}

impl TimetableConstraint for TeacherQualification {
    fn name(&self) -> &str {
        TEACHER_QUALIFICATION
    }

    fn is_hard(&self) -> bool {
        true
    }

    fn weight(&self) -> HardSoftScore {
        self.weight
    }

    fn kind(&self) -> ConstraintKind {
        ConstraintKind::Unary
    }

    fn lesson_matches(&self, timetable: &Timetable, lesson: LessonView<'_>) -> i64 {
        let Some(teacher) = lesson.assignment.teacher else {
            return 0;
        };
        let grade = timetable.school_classes[lesson.lesson.school_class].grade;
        i64::from(!timetable.teachers[teacher].is_qualified(lesson.lesson.subject, grade))
    }
}
