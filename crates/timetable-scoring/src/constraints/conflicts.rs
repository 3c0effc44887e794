use timetable_core::{HardSoftScore, Timetable};

use crate::constraint::{ConstraintKind, Join, LessonView, TimetableConstraint};

use super::{ROOM_CONFLICT, SCHOOL_CLASS_CONFLICT, TEACHER_CONFLICT};

/// Two lessons sharing a teacher, room or class in the same time slot.
///
/// A and B week lessons never meet, so they may share a slot.
#[derive(Debug, Clone)]
pub struct SlotConflict {
    join: Join,
    name: &'static str,
    weight: HardSoftScore,
}

impl SlotConflict {
    pub fn teacher(weight: HardSoftScore) -> Self {
        Self {
            join: Join::Teacher,
            name: TEACHER_CONFLICT,
            weight,
        }
    }

    /// Lessons without a room are never in conflict.
    pub fn room(weight: HardSoftScore) -> Self {
        Self {
            join: Join::Room,
            name: ROOM_CONFLICT,
            weight,
        }
    }

    pub fn school_class(weight: HardSoftScore) -> Self {
        Self {
            join: Join::SchoolClass,
            name: SCHOOL_CLASS_CONFLICT,
            weight,
        }
    }
}

impl TimetableConstraint for SlotConflict {
    fn name(&self) -> &str {
        self.name
    }

    fn is_hard(&self) -> bool {
        true
    }

    fn weight(&self) -> HardSoftScore {
        self.weight
    }

    fn kind(&self) -> ConstraintKind {
        ConstraintKind::Pair(self.join)
    }

    fn pair_matches(&self, _timetable: &Timetable, a: LessonView<'_>, b: LessonView<'_>) -> i64 {
        i64::from(a.assignment.time_slot == b.assignment.time_slot)
    }
}
