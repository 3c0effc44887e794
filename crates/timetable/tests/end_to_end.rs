//! Assemble, solve and extract the sample term.

use std::collections::HashSet;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use timetable::{
    assemble, extract, InMemoryLessonSink, InMemoryProblemSource, JobState, LessonRecord,
    SchedulingInput, SolveOutcome, SolverBuilder, SolverConfig, SolverManager,
};
use timetable_core::WeekPattern;

fn sample_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/sample_term.json")
}

fn overlapping(records: &[LessonRecord], key: impl Fn(&LessonRecord) -> Option<String>) -> usize {
    let mut clashes = 0;
    for (i, a) in records.iter().enumerate() {
        for b in &records[i + 1..] {
            if a.time_slot_id == b.time_slot_id
                && a.week_pattern.overlaps(b.week_pattern)
                && key(a).is_some()
                && key(a) == key(b)
            {
                clashes += 1;
            }
        }
    }
    clashes
}

#[test]
fn test_sample_term_solves_without_conflicts() {
    let input = SchedulingInput::from_json_file(sample_path()).unwrap();
    let before = input.clone();

    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r#"
        environment_mode = "reproducible"
        random_seed = 4

        [termination]
        step_count_limit = 400
        "#
    )
    .unwrap();
    let config = SolverConfig::load(file.path()).unwrap();

    let timetable = assemble(&input, config.allow_unresourced).unwrap();
    let result = SolverBuilder::from_config(&config)
        .unwrap()
        .build()
        .solve(timetable)
        .unwrap();
    assert_eq!(result.outcome, SolveOutcome::Feasible);
    assert_eq!(result.score.hard(), 0);

    let records = extract(&result.solution).unwrap();
    assert_eq!(records.len(), 17);
    assert_eq!(overlapping(&records, |r| r.teacher_id.map(|t| t.to_string())), 0);
    assert_eq!(overlapping(&records, |r| r.room_id.map(|t| t.to_string())), 0);
    assert_eq!(
        overlapping(&records, |r| Some(r.school_class_id.to_string())),
        0
    );

    // Ada is blocked on Monday, first period.
    let ada = input.teachers[0].id;
    let monday_first = input.time_slots[0].id;
    assert!(!records
        .iter()
        .any(|r| r.teacher_id == Some(ada) && r.time_slot_id == monday_first));

    // Break slots stay empty.
    let breaks: HashSet<_> = input
        .time_slots
        .iter()
        .filter(|s| s.is_break)
        .map(|s| s.id)
        .collect();
    assert!(records.iter().all(|r| !breaks.contains(&r.time_slot_id)));
    assert_eq!(
        records
            .iter()
            .filter(|r| r.week_pattern == WeekPattern::A)
            .count(),
        1
    );

    assert_eq!(input, before);
}

#[test]
fn test_missing_input_file() {
    assert!(SchedulingInput::from_json_file("does/not/exist.json").is_err());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_service_round_trip() {
    let input = SchedulingInput::from_json_file(sample_path()).unwrap();
    let term_id = input.term_id;
    let source = Arc::new(InMemoryProblemSource::new());
    source.insert(input);
    let sink = Arc::new(InMemoryLessonSink::new());
    let manager = SolverManager::new(source, sink.clone())
        .with_config(SolverConfig::new().with_unimproved_step_count(200).with_random_seed(8));

    let job_id = manager.start_solve(term_id).unwrap();
    let mut rx = manager.subscribe(job_id).unwrap();
    let status = tokio::time::timeout(
        Duration::from_secs(60),
        rx.wait_for(|s| s.state.is_terminal()),
    )
    .await
    .unwrap()
    .unwrap()
    .clone();

    assert_eq!(status.state, JobState::Succeeded);
    assert_eq!(status.hard_score, Some(0));
    assert_eq!(sink.lessons(term_id), manager.lessons(job_id));
}
