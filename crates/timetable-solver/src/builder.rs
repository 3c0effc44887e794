//! Wiring between configuration types and solver components.

use std::fmt;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use timetable_config::{
    AcceptorConfig, LocalSearchConfig, MoveSelectorConfig, PhaseConfig, SolverConfig,
    TerminationConfig,
};
use timetable_core::{HardSoftScore, ParseableScore};
use timetable_scoring::{timetable_constraints, ConstraintSet, ConstraintWeights};
use tracing::warn;

use crate::error::SolverError;
use crate::heuristic::{ChangeMoveSelector, MoveSelector, SwapMoveSelector, UnionMoveSelector};
use crate::phase::construction::{ConstructionForager, ConstructionHeuristicPhase};
use crate::phase::localsearch::{
    AcceptedCountForager, Acceptor, HillClimbingAcceptor, LateAcceptanceAcceptor,
    LocalSearchPhase, SimulatedAnnealingAcceptor,
};
use crate::phase::Phase;
use crate::scope::{BestScoreListener, MoveEvaluator};
use crate::solver::Solver;
use crate::termination::{
    BestScoreTermination, OrTermination, StepCountTermination, Termination, TimeTermination,
    UnimprovedStepCountTermination, UnimprovedTimeTermination,
};

/// Time limit applied when the configuration sets no termination at all.
pub const DEFAULT_SECONDS_SPENT_LIMIT: u64 = 30;

pub struct AcceptorBuilder;

impl AcceptorBuilder {
    pub fn build(config: &AcceptorConfig) -> Box<dyn Acceptor> {
        match config {
            AcceptorConfig::HillClimbing => Box::new(HillClimbingAcceptor::new()),

            AcceptorConfig::SimulatedAnnealing(sa) => Box::new(SimulatedAnnealingAcceptor::new(
                sa.starting_temperature.unwrap_or(1.0),
                sa.cooling_rate.unwrap_or(0.999),
            )),

            AcceptorConfig::LateAcceptance(la) => Box::new(LateAcceptanceAcceptor::<
                HardSoftScore,
            >::new(
                la.late_acceptance_size.unwrap_or(400)
            )),
        }
    }
}

/// Builds a [`MoveSelector`] tree from configuration.
pub fn build_move_selector(config: &MoveSelectorConfig) -> Box<dyn MoveSelector> {
    match config {
        MoveSelectorConfig::ChangeMoveSelector(change) => {
            Box::new(ChangeMoveSelector::new(change.variables.clone()))
        }
        MoveSelectorConfig::SwapMoveSelector => Box::new(SwapMoveSelector::new()),
        MoveSelectorConfig::UnionMoveSelector(union) => Box::new(UnionMoveSelector::new(
            union.selectors.iter().map(build_move_selector).collect(),
        )),
    }
}

fn build_local_search(config: &LocalSearchConfig) -> Result<LocalSearchPhase, SolverError> {
    let acceptor = config
        .acceptor
        .as_ref()
        .map(AcceptorBuilder::build)
        .unwrap_or_else(|| Box::new(LateAcceptanceAcceptor::<HardSoftScore>::default()));
    let selector = config
        .move_selector
        .as_ref()
        .map(build_move_selector)
        .unwrap_or_else(|| Box::new(UnionMoveSelector::change_and_swap()));
    let forager = config
        .forager
        .as_ref()
        .and_then(|f| f.accepted_count_limit)
        .map(AcceptedCountForager::new)
        .unwrap_or_default();

    let mut phase = LocalSearchPhase::new(selector, acceptor, forager).with_move_batch_size(
        config
            .move_batch_size
            .unwrap_or(LocalSearchPhase::DEFAULT_MOVE_BATCH_SIZE),
    );
    if let Some(termination) = config.termination.as_ref() {
        if let Some(termination) = build_termination(termination)? {
            phase = phase.with_termination(termination);
        }
    }
    Ok(phase)
}

/// Combines every limit set in `config`; `None` when none is set.
pub fn build_termination(
    config: &TerminationConfig,
) -> Result<Option<Box<dyn Termination>>, SolverError> {
    let mut terminations: Vec<Box<dyn Termination>> = Vec::new();
    if let Some(limit) = config.time_limit() {
        terminations.push(Box::new(TimeTermination::new(limit)));
    }
    if let Some(steps) = config.step_count_limit {
        terminations.push(Box::new(StepCountTermination::new(steps)));
    }
    if let Some(steps) = config.unimproved_step_count_limit {
        terminations.push(Box::new(UnimprovedStepCountTermination::new(steps)));
    }
    if let Some(limit) = config.unimproved_time_limit() {
        terminations.push(Box::new(UnimprovedTimeTermination::new(limit)));
    }
    if let Some(target) = config.best_score_limit.as_deref() {
        let target = HardSoftScore::parse(target).map_err(|e| {
            SolverError::InvalidConfig(format!("best_score_limit {:?}: {}", target, e))
        })?;
        terminations.push(Box::new(BestScoreTermination::new(target)));
    }

    Ok(match terminations.len() {
        0 => None,
        1 => terminations.pop(),
        _ => Some(Box::new(OrTermination::new(terminations))),
    })
}

/// Assembles a [`Solver`] from a [`SolverConfig`] plus runtime hooks.
///
/// ```
/// use timetable_config::SolverConfig;
/// use timetable_solver::SolverBuilder;
///
/// let config = SolverConfig::new().with_termination_seconds(5).with_random_seed(1);
/// let solver = SolverBuilder::from_config(&config).unwrap().build();
/// // Construction plus late acceptance local search.
/// assert_eq!(solver.phase_count(), 2);
/// ```
pub struct SolverBuilder {
    phases: Vec<Box<dyn Phase>>,
    weights: ConstraintWeights,
    random_seed: Option<u64>,
    evaluator: MoveEvaluator,
    termination: Option<Box<dyn Termination>>,
    terminate_flag: Option<Arc<AtomicBool>>,
    best_score_listener: Option<BestScoreListener>,
    assert_scores: bool,
}

impl fmt::Debug for SolverBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SolverBuilder")
            .field("phases", &self.phases)
            .field("weights", &self.weights)
            .field("random_seed", &self.random_seed)
            .field("evaluator", &self.evaluator)
            .field("termination", &self.termination)
            .field("terminate_flag", &self.terminate_flag)
            .field("best_score_listener", &self.best_score_listener.is_some())
            .field("assert_scores", &self.assert_scores)
            .finish()
    }
}

impl SolverBuilder {
    /// An empty builder: no phases, default weights, no termination.
    pub fn new() -> Self {
        Self {
            phases: Vec::new(),
            weights: ConstraintWeights::new(),
            random_seed: None,
            evaluator: MoveEvaluator::default(),
            termination: None,
            terminate_flag: None,
            best_score_listener: None,
            assert_scores: false,
        }
    }

    /// Wires phases, acceptors, foragers, terminations and weights from
    /// configuration.
    ///
    /// No phases configured means construction followed by late-acceptance
    /// local search. No termination configured means a time limit of
    /// [`DEFAULT_SECONDS_SPENT_LIMIT`] seconds.
    pub fn from_config(config: &SolverConfig) -> Result<Self, SolverError> {
        config
            .validate()
            .map_err(|e| SolverError::InvalidConfig(e.to_string()))?;

        let mut builder = Self::new();
        builder.evaluator = MoveEvaluator::from_thread_count(&config.move_thread_count)?;
        builder.assert_scores = config.environment_mode.is_asserted();
        builder.random_seed = match config.random_seed {
            Some(seed) => Some(seed),
            None if config.environment_mode.is_reproducible() => Some(0),
            None => None,
        };

        builder.weights = ConstraintWeights::from_pairs(
            config
                .constraint_weights
                .iter()
                .map(|(name, weight)| (name.as_str(), *weight)),
        );
        let constraints = timetable_constraints(&builder.weights);
        let unknown = builder.weights.unknown(&constraints.constraint_names());
        if !unknown.is_empty() {
            warn!(event = "unknown_constraint_weights", names = ?unknown);
        }

        if config.phases.is_empty() {
            builder.phases.push(Box::new(ConstructionHeuristicPhase::default()));
            builder.phases.push(Box::new(LocalSearchPhase::default()));
        }
        for phase in &config.phases {
            let phase: Box<dyn Phase> = match phase {
                PhaseConfig::ConstructionHeuristic(ch) => Box::new(ConstructionHeuristicPhase::new(
                    ConstructionForager::from(ch.construction_heuristic_type),
                )),
                PhaseConfig::LocalSearch(ls) => Box::new(build_local_search(ls)?),
            };
            builder.phases.push(phase);
        }

        let configured = config
            .termination
            .as_ref()
            .map(build_termination)
            .transpose()?
            .flatten();
        builder.termination = Some(configured.unwrap_or_else(|| {
            Box::new(TimeTermination::seconds(DEFAULT_SECONDS_SPENT_LIMIT))
        }));
        Ok(builder)
    }

    pub fn with_phase(mut self, phase: Box<dyn Phase>) -> Self {
        self.phases.push(phase);
        self
    }

    pub fn with_weights(mut self, weights: ConstraintWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn with_evaluator(mut self, evaluator: MoveEvaluator) -> Self {
        self.evaluator = evaluator;
        self
    }

    /// Replaces the solver termination.
    pub fn with_termination(mut self, termination: Box<dyn Termination>) -> Self {
        self.termination = Some(termination);
        self
    }

    /// Raising `flag` stops the solve between two moves.
    pub fn with_terminate_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.terminate_flag = Some(flag);
        self
    }

    /// Called on the solving thread with every new best score.
    pub fn with_best_score_listener(
        mut self,
        listener: impl FnMut(HardSoftScore) + Send + 'static,
    ) -> Self {
        self.best_score_listener = Some(Box::new(listener));
        self
    }

    pub fn with_score_assertions(mut self, enabled: bool) -> Self {
        self.assert_scores = enabled;
        self
    }

    pub fn build(self) -> Solver {
        Solver {
            phases: self.phases,
            weights: self.weights,
            random_seed: self.random_seed,
            evaluator: self.evaluator,
            termination: self.termination,
            terminate_flag: self.terminate_flag,
            best_score_listener: self.best_score_listener,
            assert_scores: self.assert_scores,
        }
    }
}

impl Default for SolverBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
