use timetable_core::{HardSoftScore, SlotKey, Teacher, Timetable};

use crate::constraint::{ConstraintKind, LessonView, TimetableConstraint};

use super::{TEACHER_AVAILABILITY, TEACHER_PREFERRED_SLOTS};

fn teacher_and_key<'t>(
    timetable: &'t Timetable,
    lesson: &LessonView<'_>,
) -> Option<(&'t Teacher, SlotKey)> {
    let teacher = &timetable.teachers[lesson.assignment.teacher?];
    let key = lesson.slot(timetable)?.key();
    Some((teacher, key))
}

/// A lesson placed in a slot its teacher has blocked.
#[derive(Debug, Clone)]
pub struct TeacherAvailability {
    weight: HardSoftScore,
}

impl TeacherAvailability {
    pub fn new(weight: HardSoftScore) -> Self {
        Self { weight }
    }
}

impl TimetableConstraint for TeacherAvailability {
    fn name(&self) -> &str {
        TEACHER_AVAILABILITY
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
        teacher_and_key(timetable, &lesson)
            .map_or(0, |(teacher, key)| i64::from(teacher.is_blocked(key)))
    }
}

/// Rewards a lesson placed in one of its teacher's preferred slots.
#[derive(Debug, Clone)]
pub struct TeacherPreferredSlots {
    weight: HardSoftScore,
}

impl TeacherPreferredSlots {
    pub fn new(weight: HardSoftScore) -> Self {
        Self { weight }
    }
}

impl TimetableConstraint for TeacherPreferredSlots {
    fn name(&self) -> &str {
        TEACHER_PREFERRED_SLOTS
    }

    fn is_hard(&self) -> bool {
        false
    }

    fn weight(&self) -> HardSoftScore {
        self.weight
    }

    fn kind(&self) -> ConstraintKind {
        ConstraintKind::Unary
    }

    fn lesson_matches(&self, timetable: &Timetable, lesson: LessonView<'_>) -> i64 {
        teacher_and_key(timetable, &lesson)
            .map_or(0, |(teacher, key)| i64::from(teacher.prefers(key)))
    }
}
