use timetable_core::{HardSoftScore, Timetable};

use crate::constraint::{ConstraintKind, Join, LessonView, TimetableConstraint};

use super::{CLASS_TEACHER_FIRST_PERIOD, SUBJECT_DISTRIBUTION};

/// The same subject taught to a class twice on one day.
#[derive(Debug, Clone)]
pub struct SubjectDistribution {
    weight: HardSoftScore,
}

impl SubjectDistribution {
    pub fn new(weight: HardSoftScore) -> Self {
        Self { weight }
    }
}

impl TimetableConstraint for SubjectDistribution {
    fn name(&self) -> &str {
        SUBJECT_DISTRIBUTION
    }

    fn is_hard(&self) -> bool {
        false
    }

    fn weight(&self) -> HardSoftScore {
        self.weight
    }

    fn kind(&self) -> ConstraintKind {
        ConstraintKind::Pair(Join::SchoolClass)
    }

    fn pair_matches(&self, _timetable: &Timetable, a: LessonView<'_>, b: LessonView<'_>) -> i64 {
        i64::from(a.lesson.subject == b.lesson.subject)
    }
}

/// A first-period lesson not taught by the class's own class-teacher.
#[derive(Debug, Clone)]
pub struct ClassTeacherFirstPeriod {
    weight: HardSoftScore,
}

impl ClassTeacherFirstPeriod {
    pub fn new(weight: HardSoftScore) -> Self {
        Self { weight }
    }
}

impl TimetableConstraint for ClassTeacherFirstPeriod {
    fn name(&self) -> &str {
        CLASS_TEACHER_FIRST_PERIOD
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
        let Some(class_teacher) = timetable.school_classes[lesson.lesson.school_class].class_teacher
        else {
            return 0;
        };
        match lesson.slot(timetable) {
            Some(slot) if slot.period == 1 => i64::from(
                lesson
                    .assignment
                    .teacher
                    .is_some_and(|t| t != class_teacher),
            ),
            _ => 0,
        }
    }
}
