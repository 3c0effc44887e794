// Typed constraint set for incremental scoring.
//
// `ConstraintSet` is implemented for tuples of `TimetableConstraint`, so the
// score director sums constraints without virtual dispatch.

use timetable_core::{HardSoftScore, Teacher, Timetable};

use crate::constraint::{ConstraintKind, ConstraintResult, Join, LessonView, TimetableConstraint};

pub trait ConstraintSet: Send + Sync {
    // Full evaluation of every constraint.
    fn evaluate_all(&self, timetable: &Timetable) -> HardSoftScore;

    fn constraint_count(&self) -> usize;

    // Per-constraint score and match count, for score explanation.
    fn evaluate_each(&self, timetable: &Timetable) -> Vec<ConstraintResult>;

    fn constraint_names(&self) -> Vec<&str>;

    // Summed impact of all unary constraints on one lesson view.
    fn lesson_score(&self, timetable: &Timetable, lesson: LessonView<'_>) -> HardSoftScore;

    // Summed impact of all pair constraints joined on `join`.
    fn pair_score(
        &self,
        timetable: &Timetable,
        join: Join,
        a: LessonView<'_>,
        b: LessonView<'_>,
    ) -> HardSoftScore;

    // Summed impact of all teacher-load constraints.
    fn load_score(&self, teacher: &Teacher, units: u32) -> HardSoftScore;

    fn uses_join(&self, join: Join) -> bool;

    fn uses_load(&self) -> bool;
}

impl ConstraintSet for () {
    fn evaluate_all(&self, _timetable: &Timetable) -> HardSoftScore {
        HardSoftScore::ZERO
    }

    fn constraint_count(&self) -> usize {
        0
    }

    fn evaluate_each(&self, _timetable: &Timetable) -> Vec<ConstraintResult> {
        Vec::new()
    }

    fn constraint_names(&self) -> Vec<&str> {
        Vec::new()
    }

    fn lesson_score(&self, _timetable: &Timetable, _lesson: LessonView<'_>) -> HardSoftScore {
        HardSoftScore::ZERO
    }

    fn pair_score(
        &self,
        _timetable: &Timetable,
        _join: Join,
        _a: LessonView<'_>,
        _b: LessonView<'_>,
    ) -> HardSoftScore {
        HardSoftScore::ZERO
    }

    fn load_score(&self, _teacher: &Teacher, _units: u32) -> HardSoftScore {
        HardSoftScore::ZERO
    }

    fn uses_join(&self, _join: Join) -> bool {
        false
    }

    fn uses_load(&self) -> bool {
        false
    }
}

macro_rules! impl_constraint_set_for_tuple {
    ($($idx:tt: $T:ident),+) => {
        impl<$($T),+> ConstraintSet for ($($T,)+)
        where
            $($T: TimetableConstraint,)+
        {
            fn evaluate_all(&self, timetable: &Timetable) -> HardSoftScore {
                let mut total = HardSoftScore::ZERO;
                $(total += self.$idx.evaluate(timetable);)+
                total
            }

            fn constraint_count(&self) -> usize {
                [$(stringify!($idx)),+].len()
            }

            fn evaluate_each(&self, timetable: &Timetable) -> Vec<ConstraintResult> {
                vec![$(ConstraintResult {
                    name: self.$idx.name().to_string(),
                    score: self.$idx.evaluate(timetable),
                    match_count: self.$idx.match_count(timetable),
                    is_hard: self.$idx.is_hard(),
                }),+]
            }

            fn constraint_names(&self) -> Vec<&str> {
                vec![$(self.$idx.name()),+]
            }

            #[inline]
            fn lesson_score(&self, timetable: &Timetable, lesson: LessonView<'_>) -> HardSoftScore {
                let mut total = HardSoftScore::ZERO;
                $(
                    if self.$idx.kind() == ConstraintKind::Unary {
                        total += self.$idx.impact(self.$idx.lesson_matches(timetable, lesson));
                    }
                )+
                total
            }

            #[inline]
            fn pair_score(
                &self,
                timetable: &Timetable,
                join: Join,
                a: LessonView<'_>,
                b: LessonView<'_>,
            ) -> HardSoftScore {
                let mut total = HardSoftScore::ZERO;
                $(
                    if self.$idx.kind() == ConstraintKind::Pair(join) {
                        total += self.$idx.impact(self.$idx.pair_matches(timetable, a, b));
                    }
                )+
                total
            }

            #[inline]
            fn load_score(&self, teacher: &Teacher, units: u32) -> HardSoftScore {
                let mut total = HardSoftScore::ZERO;
                $(
                    if self.$idx.kind() == ConstraintKind::TeacherLoad {
                        total += self.$idx.impact(self.$idx.load_matches(teacher, units));
                    }
                )+
                total
            }

            fn uses_join(&self, join: Join) -> bool {
                false $(|| self.$idx.kind() == ConstraintKind::Pair(join))+
            }

            fn uses_load(&self) -> bool {
                false $(|| self.$idx.kind() == ConstraintKind::TeacherLoad)+
            }
        }
    };
}

impl_constraint_set_for_tuple!(0: C0);
impl_constraint_set_for_tuple!(0: C0, 1: C1);
impl_constraint_set_for_tuple!(0: C0, 1: C1, 2: C2);
impl_constraint_set_for_tuple!(0: C0, 1: C1, 2: C2, 3: C3);
impl_constraint_set_for_tuple!(0: C0, 1: C1, 2: C2, 3: C3, 4: C4);
impl_constraint_set_for_tuple!(0: C0, 1: C1, 2: C2, 3: C3, 4: C4, 5: C5);
impl_constraint_set_for_tuple!(0: C0, 1: C1, 2: C2, 3: C3, 4: C4, 5: C5, 6: C6);
impl_constraint_set_for_tuple!(0: C0, 1: C1, 2: C2, 3: C3, 4: C4, 5: C5, 6: C6, 7: C7);
impl_constraint_set_for_tuple!(0: C0, 1: C1, 2: C2, 3: C3, 4: C4, 5: C5, 6: C6, 7: C7, 8: C8);
impl_constraint_set_for_tuple!(0: C0, 1: C1, 2: C2, 3: C3, 4: C4, 5: C5, 6: C6, 7: C7, 8: C8, 9: C9);
impl_constraint_set_for_tuple!(0: C0, 1: C1, 2: C2, 3: C3, 4: C4, 5: C5, 6: C6, 7: C7, 8: C8, 9: C9, 10: C10);
impl_constraint_set_for_tuple!(0: C0, 1: C1, 2: C2, 3: C3, 4: C4, 5: C5, 6: C6, 7: C7, 8: C8, 9: C9, 10: C10, 11: C11);
