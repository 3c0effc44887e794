//! Tests for solver configuration.

use std::io::Write;

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        environment_mode = "reproducible"
        random_seed = 42
        allow_unresourced = true

        [termination]
        seconds_spent_limit = 30
        best_score_limit = "0hard/0soft"

        [constraint_weights]
        subjectDistribution = 2

        [[phases]]
        type = "construction_heuristic"
        construction_heuristic_type = "best_fit"

        [[phases]]
        type = "local_search"
        move_batch_size = 32
        [phases.acceptor]
        type = "late_acceptance"
        late_acceptance_size = 400
        [phases.move_selector]
        type = "union_move_selector"
        [[phases.move_selector.selectors]]
        type = "change_move_selector"
        variables = ["time_slot", "room"]
        [[phases.move_selector.selectors]]
        type = "swap_move_selector"
    "#;

    let config = SolverConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.environment_mode, EnvironmentMode::Reproducible);
    assert_eq!(config.random_seed, Some(42));
    assert!(config.allow_unresourced);
    assert_eq!(config.constraint_weight("subjectDistribution"), Some(2));
    assert_eq!(config.constraint_weight("roomConflict"), None);
    assert_eq!(
        config.termination.as_ref().unwrap().best_score_limit.as_deref(),
        Some("0hard/0soft")
    );

    match &config.phases[0] {
        PhaseConfig::ConstructionHeuristic(ch) => {
            assert_eq!(ch.construction_heuristic_type, ConstructionHeuristicType::BestFit)
        }
        other => panic!("unexpected phase {:?}", other),
    }
    match &config.phases[1] {
        PhaseConfig::LocalSearch(ls) => {
            assert_eq!(ls.move_batch_size, Some(32));
            match ls.move_selector.as_ref().unwrap() {
                MoveSelectorConfig::UnionMoveSelector(u) => {
                    assert_eq!(u.selectors.len(), 2);
                    assert_eq!(
                        u.selectors[0],
                        MoveSelectorConfig::ChangeMoveSelector(ChangeMoveConfig {
                            variables: vec![LessonVariable::TimeSlot, LessonVariable::Room],
                        })
                    );
                }
                other => panic!("unexpected selector {:?}", other),
            }
        }
        other => panic!("unexpected phase {:?}", other),
    }
    assert!(config.validate().is_ok());
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        environment_mode: full_assert
        random_seed: 42
        termination:
          unimproved_step_count_limit: 1000
        phases:
          - type: construction_heuristic
          - type: local_search
            acceptor:
              type: simulated_annealing
              starting_temperature: 2.5
              cooling_rate: 0.999
    "#;

    let config = SolverConfig::from_yaml_str(yaml).unwrap();
    assert!(config.environment_mode.is_asserted());
    assert!(config.environment_mode.is_reproducible());
    assert_eq!(
        config.termination.unwrap().unimproved_step_count_limit,
        Some(1000)
    );
}

#[test]
fn test_builder() {
    let config = SolverConfig::new()
        .with_random_seed(123)
        .with_termination_seconds(60)
        .with_unimproved_step_count(500)
        .with_constraint_weight("subjectDistribution", 4)
        .with_phase(PhaseConfig::ConstructionHeuristic(
            ConstructionHeuristicConfig::default(),
        ))
        .with_phase(PhaseConfig::LocalSearch(LocalSearchConfig::default()));

    assert_eq!(config.random_seed, Some(123));
    assert_eq!(config.time_limit(), Some(Duration::from_secs(60)));
    assert_eq!(
        config.termination.unwrap().unimproved_step_count_limit,
        Some(500)
    );
    assert_eq!(config.phases.len(), 2);
}

#[test]
fn test_minutes_add_to_seconds() {
    let termination = TerminationConfig {
        seconds_spent_limit: Some(30),
        minutes_spent_limit: Some(2),
        ..Default::default()
    };
    assert_eq!(termination.time_limit(), Some(Duration::from_secs(150)));
    assert_eq!(TerminationConfig::default().time_limit(), None);
}

#[test]
fn test_validate_rejects_bad_values() {
    let zero_threads = SolverConfig {
        move_thread_count: MoveThreadCount::Count(0),
        ..Default::default()
    };
    assert!(matches!(zero_threads.validate(), Err(ConfigError::Invalid(_))));

    let bad_cooling = SolverConfig::new().with_phase(PhaseConfig::LocalSearch(LocalSearchConfig {
        acceptor: Some(AcceptorConfig::SimulatedAnnealing(SimulatedAnnealingConfig {
            starting_temperature: None,
            cooling_rate: Some(1.5),
        })),
        ..Default::default()
    }));
    assert!(bad_cooling.validate().is_err());

    let empty_history = SolverConfig::new().with_phase(PhaseConfig::LocalSearch(LocalSearchConfig {
        acceptor: Some(AcceptorConfig::LateAcceptance(LateAcceptanceConfig {
            late_acceptance_size: Some(0),
        })),
        ..Default::default()
    }));
    assert!(empty_history.validate().is_err());
}

#[test]
fn test_load_by_extension() {
    let mut yaml = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(yaml, "random_seed: 9").unwrap();
    assert_eq!(SolverConfig::load(yaml.path()).unwrap().random_seed, Some(9));

    let mut toml = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(toml, "random_seed = 10").unwrap();
    assert_eq!(SolverConfig::load(toml.path()).unwrap().random_seed, Some(10));
}

#[test]
fn test_missing_file_falls_back_to_default() {
    let err = SolverConfig::load("/nonexistent/solver.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
    assert_eq!(
        SolverConfig::load("/nonexistent/solver.toml").unwrap_or_default(),
        SolverConfig::default()
    );
}
