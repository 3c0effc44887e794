use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use timetable_config::{SolverConfig, TerminationConfig};
use timetable_core::{QualificationLevel, Timetable, WeekPattern};
use timetable_test::{sample_school, TimetableBuilder};

use super::*;
use crate::builder::SolverBuilder;
use crate::phase::construction::ConstructionHeuristicPhase;
use crate::phase::localsearch::LocalSearchPhase;
use crate::termination::{
    StepCountTermination, TimeTermination, UnimprovedStepCountTermination,
    UnimprovedTimeTermination,
};

fn default_phases(builder: SolverBuilder) -> SolverBuilder {
    builder
        .with_phase(Box::new(ConstructionHeuristicPhase::default()))
        .with_phase(Box::new(LocalSearchPhase::default()))
        .with_evaluator(MoveEvaluator::Sequential)
}

/// One slot, two lessons of the same class: a class conflict is unavoidable.
fn overbooked() -> Timetable {
    let mut b = TimetableBuilder::new(1, 1);
    let math = b.subject("Mathematics", "MA");
    let class_a = b.school_class("5a", 5, 20);
    let ada = b.teacher("Ada");
    let alan = b.teacher("Alan");
    b.qualify(ada, math, QualificationLevel::Primary, &[5])
        .qualify(alan, math, QualificationLevel::Primary, &[5]);
    b.room("101", None);
    b.room("102", None);
    b.lesson(class_a, math, WeekPattern::Every);
    b.lesson(class_a, math, WeekPattern::Every);
    b.build()
}

#[test]
fn test_sample_school_solves_feasibly() {
    let solver = default_phases(SolverBuilder::new())
        .with_random_seed(7)
        .with_termination(Box::new(StepCountTermination::new(200)))
        .build();
    let result = solver.solve(sample_school().timetable).unwrap();

    assert_eq!(result.outcome, SolveOutcome::Feasible);
    assert!(result.is_feasible());
    assert_eq!(result.termination, TerminationReason::StepLimit);
    assert_eq!(result.unplaced, 0);
    assert_eq!(result.solution.score, Some(result.score));
    assert_eq!(result.stats.step_count, 200);
    assert_eq!(result.constraint_breakdown.len(), 11);
    let breakdown_total = result
        .constraint_breakdown
        .iter()
        .fold(HardSoftScore::ZERO, |acc, c| acc + c.score);
    assert_eq!(breakdown_total, result.score);
}

#[test]
fn test_same_seed_gives_same_timetable() {
    let run = || {
        default_phases(SolverBuilder::new())
            .with_random_seed(21)
            .with_termination(Box::new(StepCountTermination::new(120)))
            .build()
            .solve(sample_school().timetable)
            .unwrap()
    };
    let first = run();
    let second = run();
    assert_eq!(first.score, second.score);
    assert_eq!(first.solution.lessons, second.solution.lessons);
}

#[test]
fn test_raised_flag_cancels_before_any_step() {
    let flag = Arc::new(AtomicBool::new(true));
    let solver = default_phases(SolverBuilder::new())
        .with_terminate_flag(flag)
        .with_termination(Box::new(TimeTermination::seconds(30)))
        .build();
    let result = solver.solve(sample_school().timetable).unwrap();

    assert!(result.is_cancelled());
    assert_eq!(result.stats.step_count, 0);
    assert_eq!(result.unplaced, 25);
    assert_eq!(result.outcome, SolveOutcome::Infeasible);
}

#[test]
fn test_time_limit_without_feasible_timetable_times_out() {
    let solver = default_phases(SolverBuilder::new())
        .with_random_seed(1)
        .with_termination(Box::new(TimeTermination::millis(50)))
        .build();
    let result = solver.solve(overbooked()).unwrap();

    assert_eq!(result.termination, TerminationReason::TimeLimit);
    assert_eq!(result.outcome, SolveOutcome::TimedOut);
    assert!(result.score.hard() < 0);
    assert_eq!(result.unplaced, 0);
}

/// Limits below the lesson count still leave every lesson placed.
fn solve_with_limit(termination: Box<dyn Termination>) -> SolveResult {
    default_phases(SolverBuilder::new())
        .with_random_seed(4)
        .with_termination(termination)
        .build()
        .solve(sample_school().timetable)
        .unwrap()
}

#[test]
fn test_step_limit_below_lesson_count_completes_construction() {
    let result = solve_with_limit(Box::new(StepCountTermination::new(5)));

    assert_eq!(result.termination, TerminationReason::StepLimit);
    assert_eq!(result.unplaced, 0);
    assert_eq!(result.stats.step_count, 25);
    assert!(result.solution.lessons.iter().all(|l| l.time_slot.is_some()));
}

#[test]
fn test_unimproved_limit_below_lesson_count_completes_construction() {
    let result = solve_with_limit(Box::new(UnimprovedStepCountTermination::new(5)));

    assert_eq!(result.termination, TerminationReason::UnimprovedSteps);
    assert_eq!(result.unplaced, 0);
    assert!(result.stats.step_count >= 30);
    assert!(result.solution.lessons.iter().all(|l| l.time_slot.is_some()));
}

#[test]
fn test_short_time_limit_completes_construction() {
    let result = solve_with_limit(Box::new(TimeTermination::millis(1)));

    assert_eq!(result.termination, TerminationReason::TimeLimit);
    assert_eq!(result.unplaced, 0);
    assert!(result.stats.step_count >= 25);
}

#[test]
fn test_unimproved_time_limit_completes_construction() {
    let result = solve_with_limit(Box::new(UnimprovedTimeTermination::new(Duration::ZERO)));

    assert_eq!(result.termination, TerminationReason::UnimprovedTime);
    assert_eq!(result.unplaced, 0);
    assert_eq!(result.stats.step_count, 25);
}

#[test]
fn test_construction_only_reports_infeasible() {
    let solver = SolverBuilder::new()
        .with_phase(Box::new(ConstructionHeuristicPhase::default()))
        .build();
    let result = solver.solve(overbooked()).unwrap();

    assert_eq!(result.termination, TerminationReason::Completed);
    assert_eq!(result.outcome, SolveOutcome::Infeasible);
}

#[test]
fn test_best_score_listener_sees_final_score() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let solver = default_phases(SolverBuilder::new())
        .with_random_seed(5)
        .with_termination(Box::new(StepCountTermination::new(100)))
        .with_best_score_listener(move |score| sink.lock().unwrap().push(score))
        .build();
    let result = solver.solve(sample_school().timetable).unwrap();

    let seen = seen.lock().unwrap();
    assert!(!seen.is_empty());
    assert_eq!(seen.last(), Some(&result.score));
}

#[test]
fn test_score_assertions_hold_during_search() {
    let solver = default_phases(SolverBuilder::new())
        .with_random_seed(3)
        .with_score_assertions(true)
        .with_termination(Box::new(StepCountTermination::new(80)))
        .build();
    let result = solver.solve(sample_school().timetable).unwrap();
    assert_eq!(result.stats.step_count, 80);
}

#[test]
fn test_solver_from_config() {
    let config = SolverConfig {
        termination: Some(TerminationConfig {
            step_count_limit: Some(60),
            ..TerminationConfig::default()
        }),
        move_thread_count: timetable_config::MoveThreadCount::Count(2),
        ..SolverConfig::default()
    }
    .with_random_seed(11);
    let result = SolverBuilder::from_config(&config)
        .unwrap()
        .build()
        .solve(sample_school().timetable)
        .unwrap();
    assert_eq!(result.termination, TerminationReason::StepLimit);
    assert!(result.is_feasible());
}

#[test]
fn test_invalid_timetable_is_rejected() {
    let mut timetable = sample_school().timetable;
    timetable.lessons[0].candidate_rooms.push(99);
    let err = SolverBuilder::new().build().solve(timetable).unwrap_err();
    assert!(matches!(err, SolverError::Domain(_)));
}
