use timetable_core::{HardSoftScore, QualificationLevel, Score, WeekPattern};
use timetable_scoring::{timetable_constraints, ConstraintWeights, TimetableScoreDirector};
use timetable_test::{sample_school, TimetableBuilder};

use super::*;
use crate::phase::Phase;
use crate::scope::{MoveEvaluator, SolverScope, SolverState};

fn scope_for(timetable: timetable_core::Timetable) -> SolverScope {
    let director =
        TimetableScoreDirector::new(timetable, timetable_constraints(&ConstraintWeights::new()));
    let mut scope = SolverScope::with_seed(director, 11).with_evaluator(MoveEvaluator::Sequential);
    scope.start_solving();
    scope
}

#[test]
fn test_placement_order_most_constrained_first() {
    let school = sample_school();
    let timetable = &school.timetable;
    let order = placement_order(timetable);
    assert_eq!(order.len(), timetable.lessons.len());

    let first = &timetable.lessons[order[0]];
    let last = &timetable.lessons[order[order.len() - 1]];
    assert_eq!(first.candidate_teachers.len(), 1);
    assert_eq!(last.candidate_teachers.len(), 2);
    // Among single-teacher lessons the bigger class goes first.
    assert_eq!(first.school_class, school.class_6a);
}

#[test]
fn test_candidate_moves_cover_slot_room_teacher() {
    let school = sample_school();
    let timetable = &school.timetable;
    let slots = timetable.assignable_slots();

    let open = timetable
        .lessons
        .iter()
        .find(|l| l.candidate_teachers.len() == 2)
        .map(|l| l.id)
        .unwrap();
    let moves = candidate_moves(timetable, open, &slots);
    let rooms = timetable.lessons[open].candidate_rooms.len();
    assert_eq!(moves.len(), slots.len() * rooms * 2);

    let pinned = timetable
        .lessons
        .iter()
        .find(|l| l.is_teacher_pinned())
        .unwrap();
    let moves = candidate_moves(timetable, pinned.id, &slots);
    assert!(moves
        .iter()
        .all(|m| m.changes()[0].to.teacher == pinned.teacher));
}

#[test]
fn test_forager_first_fit_and_best_fit() {
    let current = HardSoftScore::of(-1, 0);
    let scores = [
        HardSoftScore::of(-2, 0),
        HardSoftScore::of(-1, -4),
        HardSoftScore::of(-1, 0),
    ];
    assert_eq!(ConstructionForager::FirstFit.pick(current, &scores), Some(1));
    assert_eq!(ConstructionForager::BestFit.pick(current, &scores), Some(2));

    let all_worse = [HardSoftScore::of(-3, 0), HardSoftScore::of(-2, -1)];
    assert_eq!(ConstructionForager::FirstFit.pick(current, &all_worse), Some(1));
    assert_eq!(ConstructionForager::BestFit.pick(current, &[]), None);
}

#[test]
fn test_construction_places_every_lesson_without_hard_penalties() {
    for forager in [ConstructionForager::FirstFit, ConstructionForager::BestFit] {
        let mut scope = scope_for(sample_school().timetable);
        ConstructionHeuristicPhase::new(forager)
            .solve(&mut scope, 0)
            .unwrap();

        assert_eq!(scope.state(), SolverState::Constructing);
        let best = scope.best_solution().unwrap();
        assert!(best.lessons.iter().all(|l| l.is_complete(false)));
        assert!(scope.best_score().unwrap().is_feasible(), "{:?}", forager);
        assert_eq!(scope.total_step_count(), best.lessons.len() as u64);
        assert!(scope.score_director().verify().is_ok());
    }
}

#[test]
fn test_construction_avoids_blocked_slots() {
    let mut b = TimetableBuilder::new(1, 3);
    let math = b.subject("Mathematics", "MA");
    let class_a = b.school_class("5a", 5, 20);
    let ada = b.teacher("Ada");
    b.qualify(ada, math, QualificationLevel::Primary, &[5])
        .block(ada, 0, 1)
        .block(ada, 0, 2);
    b.room("101", None);
    b.lesson(class_a, math, WeekPattern::Every);

    let mut scope = scope_for(b.build());
    ConstructionHeuristicPhase::default()
        .solve(&mut scope, 0)
        .unwrap();

    let best = scope.best_solution().unwrap();
    let slot = best.slot_of(&best.lessons[0]).unwrap();
    assert_eq!(slot.period, 3);
    assert_eq!(scope.best_score(), Some(HardSoftScore::ZERO));
}

#[test]
fn test_break_slots_are_never_used() {
    let mut b = TimetableBuilder::new(1, 3);
    let math = b.subject("Mathematics", "MA");
    let class_a = b.school_class("5a", 5, 20);
    let ada = b.teacher("Ada");
    b.qualify(ada, math, QualificationLevel::Primary, &[5])
        .mark_break(0, 1)
        .mark_break(0, 2);
    b.room("101", None);
    b.lesson(class_a, math, WeekPattern::Every);
    b.lesson(class_a, math, WeekPattern::Every);

    let mut scope = scope_for(b.build());
    ConstructionHeuristicPhase::default()
        .solve(&mut scope, 0)
        .unwrap();

    let best = scope.best_solution().unwrap();
    for lesson in &best.lessons {
        assert!(!best.slot_of(lesson).unwrap().is_break);
    }
    // Both lessons share the only teaching slot.
    assert_eq!(scope.best_score().unwrap().hard(), -3);
}
