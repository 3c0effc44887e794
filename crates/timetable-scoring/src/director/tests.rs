use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use timetable_core::{Assignment, HardSoftScore, QualificationLevel, Timetable, WeekPattern};
use timetable_test::{sample_school, TimetableBuilder};

use super::*;
use crate::constraints::timetable_constraints;
use crate::weights::ConstraintWeights;

fn director(timetable: Timetable) -> TimetableScoreDirector {
    TimetableScoreDirector::new(timetable, timetable_constraints(&ConstraintWeights::new()))
}

fn full_score(timetable: &Timetable) -> HardSoftScore {
    timetable_constraints(&ConstraintWeights::new()).evaluate_all(timetable)
}

fn random_assignment(timetable: &Timetable, lesson: usize, rng: &mut StdRng) -> Assignment {
    let lesson = &timetable.lessons[lesson];
    let slots = timetable.assignable_slots();
    let pick = |rng: &mut StdRng, values: &[usize]| -> Option<usize> {
        if values.is_empty() || rng.random_range(0..10) == 0 {
            None
        } else {
            Some(values[rng.random_range(0..values.len())])
        }
    };
    Assignment::new(
        pick(rng, &slots),
        pick(rng, &lesson.candidate_rooms),
        pick(rng, &lesson.candidate_teachers),
    )
}

#[test]
fn test_initial_score_matches_full_evaluation() {
    let school = sample_school();
    let expected = full_score(&school.timetable);
    let d = director(school.timetable);
    assert_eq!(d.score(), expected);
    assert!(d.verify().is_ok());
}

#[test]
fn test_incremental_equals_full_after_random_moves() {
    let mut rng = StdRng::seed_from_u64(17);
    let mut d = director(sample_school().timetable);
    let lesson_count = d.working_solution().lessons.len();

    for step in 0..600 {
        let changes: Vec<LessonChange> = if rng.random_bool(0.3) {
            let a = rng.random_range(0..lesson_count);
            let b = (a + 1 + rng.random_range(0..lesson_count - 1)) % lesson_count;
            let la = d.working_solution().lessons[a].assignment();
            let lb = d.working_solution().lessons[b].assignment();
            vec![
                LessonChange::new(a, la, Assignment { time_slot: lb.time_slot, room: lb.room, ..la }),
                LessonChange::new(b, lb, Assignment { time_slot: la.time_slot, room: la.room, ..lb }),
            ]
        } else {
            let lesson = rng.random_range(0..lesson_count);
            let from = d.working_solution().lessons[lesson].assignment();
            let to = random_assignment(d.working_solution(), lesson, &mut rng);
            vec![LessonChange::new(lesson, from, to)]
        };

        let mut preview = d.working_solution().clone();
        for ch in &changes {
            preview.lessons[ch.lesson].set_assignment(ch.to);
        }
        let predicted = d.score_if(&changes);
        assert_eq!(predicted, full_score(&preview), "step {}", step);

        let applied = d.apply(&changes).unwrap();
        assert_eq!(applied, predicted);
        assert!(d.verify().is_ok(), "drift at step {}", step);
    }
}

#[test]
fn test_undo_restores_score() {
    let mut d = director(sample_school().timetable);
    let before = d.score();
    let from = d.working_solution().lessons[0].assignment();
    let change = LessonChange::new(0, from, Assignment { time_slot: Some(3), ..from });

    d.apply(&[change]).unwrap();
    d.apply(&[change.reversed()]).unwrap();
    assert_eq!(d.score(), before);
    assert_eq!(d.working_solution().lessons[0].assignment(), from);
}

#[test]
fn test_score_if_does_not_mutate() {
    let d = director(sample_school().timetable);
    let before = d.working_solution().lessons[2].assignment();
    let change = LessonChange::new(2, before, Assignment { time_slot: Some(0), ..before });
    let _ = d.score_if(&[change]);
    assert_eq!(d.working_solution().lessons[2].assignment(), before);
    assert!(change.reversed().reversed() == change);
    assert!(!change.is_noop());
}

#[test]
fn test_apply_rejects_stale_and_duplicate_changes() {
    let mut d = director(sample_school().timetable);
    let current = d.working_solution().lessons[0].assignment();
    let stale = Assignment { time_slot: Some(7), ..current };

    let err = d
        .apply(&[LessonChange::new(0, stale, current)])
        .unwrap_err();
    assert!(matches!(err, DirectorError::StaleChange { lesson: 0, .. }));

    let to = Assignment { time_slot: Some(1), ..current };
    let err = d
        .apply(&[LessonChange::new(0, current, to), LessonChange::new(0, to, current)])
        .unwrap_err();
    assert_eq!(err, DirectorError::DuplicateLesson(0));
}

#[test]
fn test_swap_of_conflicting_pair() {
    let mut b = TimetableBuilder::new(1, 3);
    let math = b.subject("Mathematics", "MA");
    let class_a = b.school_class("5a", 5, 20);
    let class_b = b.school_class("5b", 5, 20);
    let ada = b.teacher("Ada");
    b.qualify(ada, math, QualificationLevel::Primary, &[5]);
    let room = b.room("101", None);
    let l1 = b.lesson(class_a, math, WeekPattern::Every);
    let l2 = b.lesson(class_b, math, WeekPattern::Every);
    b.place(l1, 0, 2, Some(room), Some(ada));
    b.place(l2, 0, 2, Some(room), Some(ada));

    let mut d = director(b.build());
    assert_eq!(d.score(), HardSoftScore::of(-2, 0));

    let from = d.working_solution().lessons[l2].assignment();
    let to = Assignment { time_slot: Some(2), ..from };
    assert_eq!(d.score_if(&[LessonChange::new(l2, from, to)]), HardSoftScore::ZERO);
    d.apply(&[LessonChange::new(l2, from, to)]).unwrap();

    let solution = d.clone_solution();
    assert_eq!(solution.score, Some(HardSoftScore::ZERO));
    assert!(d.explain().iter().all(|r| r.match_count == 0));
}

#[test]
fn test_reset_rebuilds_index() {
    let school = sample_school();
    let mut d = director(school.timetable.clone());
    let from = d.working_solution().lessons[0].assignment();
    d.apply(&[LessonChange::new(0, from, Assignment { time_slot: Some(5), ..from })])
        .unwrap();

    d.reset(school.timetable.clone());
    assert_eq!(d.score(), full_score(&school.timetable));
    assert!(d.verify().is_ok());
    assert_eq!(d.into_solution().lessons[0].assignment(), from);
}
