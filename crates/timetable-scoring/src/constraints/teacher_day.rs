use timetable_core::{HardSoftScore, Teacher, Timetable};

use crate::constraint::{ConstraintKind, Join, LessonView, TimetableConstraint};

use super::{MINIMIZE_TEACHER_GAPS, TEACHER_MAX_HOURS};

/// Idle periods between two lessons of the same teacher on the same day.
///
/// Every same-day pair counts, so periods 1 and 4 cost 2 and adjacent
/// periods cost nothing.
#[derive(Debug, Clone)]
pub struct MinimizeTeacherGaps {
    weight: HardSoftScore,
}

impl MinimizeTeacherGaps {
    pub fn new(weight: HardSoftScore) -> Self {
        Self { weight }
    }
}

impl TimetableConstraint for MinimizeTeacherGaps {
    fn name(&self) -> &str {
        MINIMIZE_TEACHER_GAPS
    }

    fn is_hard(&self) -> bool {
        false
    }

    fn weight(&self) -> HardSoftScore {
        self.weight
    }

    fn kind(&self) -> ConstraintKind {
        ConstraintKind::Pair(Join::Teacher)
    }

    fn pair_matches(&self, timetable: &Timetable, a: LessonView<'_>, b: LessonView<'_>) -> i64 {
        match (a.slot(timetable), b.slot(timetable)) {
            (Some(x), Some(y)) => (i64::from(x.period) - i64::from(y.period)).abs() - 1,
            _ => 0,
        }
        .max(0)
    }
}

/// Weekly hours above a teacher's cap, in whole hours.
///
/// A and B week lessons count half an hour each.
#[derive(Debug, Clone)]
pub struct TeacherMaxHours {
    weight: HardSoftScore,
}

impl TeacherMaxHours {
    pub fn new(weight: HardSoftScore) -> Self {
        Self { weight }
    }
}

impl TimetableConstraint for TeacherMaxHours {
    fn name(&self) -> &str {
        TEACHER_MAX_HOURS
    }

    fn is_hard(&self) -> bool {
        true
    }

    fn weight(&self) -> HardSoftScore {
        self.weight
    }

    fn kind(&self) -> ConstraintKind {
        ConstraintKind::TeacherLoad
    }

    fn load_matches(&self, teacher: &Teacher, units: u32) -> i64 {
        let Some(cap) = teacher.max_hours_per_week else {
            return 0;
        };
        let excess = units.saturating_sub(cap.saturating_mul(2));
        i64::from(excess.div_ceil(2))
    }
}
