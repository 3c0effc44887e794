use timetable_config::{
    AcceptorConfig, ChangeMoveConfig, ConstructionHeuristicConfig, ConstructionHeuristicType,
    LateAcceptanceConfig, LessonVariable, LocalSearchConfig, MoveSelectorConfig, PhaseConfig,
    SimulatedAnnealingConfig, SolverConfig, TerminationConfig, UnionMoveSelectorConfig,
};

use super::*;

#[test]
fn test_default_config_builds_two_phases() {
    let builder = SolverBuilder::from_config(&SolverConfig::new()).unwrap();
    assert_eq!(builder.phases.len(), 2);
    assert_eq!(builder.phases[0].phase_type_name(), "ConstructionHeuristic");
    assert_eq!(builder.phases[1].phase_type_name(), "LocalSearch");
    // Falls back to the default time limit.
    assert!(builder.termination.is_some());
    assert!(builder.random_seed.is_none());
}

#[test]
fn test_reproducible_mode_fixes_seed() {
    let config = SolverConfig {
        environment_mode: timetable_config::EnvironmentMode::Reproducible,
        ..SolverConfig::default()
    };
    let builder = SolverBuilder::from_config(&config).unwrap();
    assert_eq!(builder.random_seed, Some(0));

    let builder = SolverBuilder::from_config(&config.with_random_seed(9)).unwrap();
    assert_eq!(builder.random_seed, Some(9));
}

#[test]
fn test_configured_phases_in_order() {
    let config = SolverConfig::new()
        .with_phase(PhaseConfig::ConstructionHeuristic(
            ConstructionHeuristicConfig {
                construction_heuristic_type: ConstructionHeuristicType::BestFit,
            },
        ))
        .with_phase(PhaseConfig::LocalSearch(LocalSearchConfig {
            acceptor: Some(AcceptorConfig::HillClimbing),
            move_batch_size: Some(8),
            termination: Some(TerminationConfig {
                step_count_limit: Some(10),
                ..TerminationConfig::default()
            }),
            ..LocalSearchConfig::default()
        }))
        .with_phase(PhaseConfig::LocalSearch(LocalSearchConfig::default()));

    let solver = SolverBuilder::from_config(&config).unwrap().build();
    assert_eq!(solver.phase_count(), 3);
}

#[test]
fn test_acceptor_builder_applies_defaults() {
    let sa = AcceptorBuilder::build(&AcceptorConfig::SimulatedAnnealing(
        SimulatedAnnealingConfig {
            starting_temperature: Some(5.0),
            cooling_rate: None,
        },
    ));
    assert!(format!("{:?}", sa).contains("SimulatedAnnealing"));

    let la = AcceptorBuilder::build(&AcceptorConfig::LateAcceptance(LateAcceptanceConfig {
        late_acceptance_size: Some(20),
    }));
    assert!(format!("{:?}", la).contains("LateAcceptance"));
}

#[test]
fn test_move_selector_tree() {
    let selector = build_move_selector(&MoveSelectorConfig::UnionMoveSelector(
        UnionMoveSelectorConfig {
            selectors: vec![
                MoveSelectorConfig::ChangeMoveSelector(ChangeMoveConfig {
                    variables: vec![LessonVariable::Room],
                }),
                MoveSelectorConfig::SwapMoveSelector,
            ],
        },
    ));
    let debug = format!("{:?}", selector);
    assert!(debug.contains("ChangeMoveSelector"));
    assert!(debug.contains("SwapMoveSelector"));
}

#[test]
fn test_termination_from_config() {
    assert!(build_termination(&TerminationConfig::default())
        .unwrap()
        .is_none());

    let single = TerminationConfig {
        seconds_spent_limit: Some(3),
        ..TerminationConfig::default()
    };
    assert!(build_termination(&single).unwrap().is_some());

    let combined = TerminationConfig {
        step_count_limit: Some(100),
        best_score_limit: Some("0hard/-5soft".to_string()),
        ..TerminationConfig::default()
    };
    let termination = build_termination(&combined).unwrap().unwrap();
    assert!(format!("{:?}", termination).contains("BestScoreTermination"));
}

#[test]
fn test_invalid_best_score_limit_is_rejected() {
    let config = SolverConfig {
        termination: Some(TerminationConfig {
            best_score_limit: Some("zero".to_string()),
            ..TerminationConfig::default()
        }),
        ..SolverConfig::default()
    };
    let err = SolverBuilder::from_config(&config).unwrap_err();
    assert!(matches!(err, SolverError::InvalidConfig(_)));
}

#[test]
fn test_invalid_phase_config_is_rejected() {
    let config = SolverConfig::new().with_phase(PhaseConfig::LocalSearch(LocalSearchConfig {
        move_batch_size: Some(0),
        ..LocalSearchConfig::default()
    }));
    assert!(matches!(
        SolverBuilder::from_config(&config),
        Err(SolverError::InvalidConfig(_))
    ));
}
