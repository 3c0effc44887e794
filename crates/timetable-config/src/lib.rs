//! Configuration for the timetabling solver.
//!
//! Load solver configuration from TOML or YAML files to control termination,
//! phases, acceptors and constraint weights without code changes.
//!
//! # Examples
//!
//! ```
//! use timetable_config::SolverConfig;
//! use std::time::Duration;
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     random_seed = 7
//!
//!     [termination]
//!     seconds_spent_limit = 30
//!     unimproved_step_count_limit = 5000
//!
//!     [constraint_weights]
//!     subjectDistribution = 3
//!
//!     [[phases]]
//!     type = "construction_heuristic"
//!
//!     [[phases]]
//!     type = "local_search"
//!     [phases.acceptor]
//!     type = "late_acceptance"
//!     late_acceptance_size = 400
//! "#).unwrap();
//!
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
//! assert_eq!(config.constraint_weight("subjectDistribution"), Some(3));
//! assert_eq!(config.phases.len(), 2);
//! ```
//!
//! Fall back to defaults when the file is missing:
//!
//! ```
//! use timetable_config::SolverConfig;
//!
//! let config = SolverConfig::load("solver.toml").unwrap_or_default();
//! assert!(config.phases.is_empty());
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(test)]
mod tests;

/// A configuration file could not be read or makes no sense.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Everything that steers one timetable solve.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverConfig {
    #[serde(default)]
    pub environment_mode: EnvironmentMode,

    /// Seed for the move sampler; implies a reproducible run.
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Threads scoring sampled moves.
    #[serde(default)]
    pub move_thread_count: MoveThreadCount,

    #[serde(default)]
    pub termination: Option<TerminationConfig>,

    /// Phases run in order. Empty means the default construction plus
    /// late-acceptance local search.
    #[serde(default)]
    pub phases: Vec<PhaseConfig>,

    /// Per-constraint weight overrides, keyed by constraint name.
    #[serde(default)]
    pub constraint_weights: BTreeMap<String, u32>,

    /// Lets lessons finish without a room or teacher when none can be found.
    #[serde(default)]
    pub allow_unresourced: bool,
}

impl SolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file, choosing YAML for `.yaml`/`.yml`
    /// extensions and TOML otherwise.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist, fails to parse, or fails
    /// [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path)?,
            _ => Self::from_toml_file(path)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn with_termination_seconds(mut self, seconds: u64) -> Self {
        self.termination = Some(TerminationConfig {
            seconds_spent_limit: Some(seconds),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    pub fn with_unimproved_step_count(mut self, steps: u64) -> Self {
        self.termination = Some(TerminationConfig {
            unimproved_step_count_limit: Some(steps),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn with_phase(mut self, phase: PhaseConfig) -> Self {
        self.phases.push(phase);
        self
    }

    pub fn with_constraint_weight(mut self, constraint: impl Into<String>, weight: u32) -> Self {
        self.constraint_weights.insert(constraint.into(), weight);
        self
    }

    pub fn with_allow_unresourced(mut self, allow: bool) -> Self {
        self.allow_unresourced = allow;
        self
    }

    /// Wall-clock limit of the whole solve.
    pub fn time_limit(&self) -> Option<Duration> {
        self.termination.as_ref().and_then(|t| t.time_limit())
    }

    /// Returns the configured weight override for a constraint.
    pub fn constraint_weight(&self, constraint: &str) -> Option<u32> {
        self.constraint_weights.get(constraint).copied()
    }

    /// Rejects settings that would make the solver misbehave.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let MoveThreadCount::Count(0) = self.move_thread_count {
            return Err(ConfigError::Invalid(
                "move_thread_count must be at least 1".to_string(),
            ));
        }
        for phase in &self.phases {
            if let PhaseConfig::LocalSearch(ls) = phase {
                ls.validate()?;
            }
        }
        Ok(())
    }
}

/// Trades speed for determinism and self-checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentMode {
    /// Seeds the random generator from the OS.
    #[default]
    NonReproducible,

    /// Uses `random_seed` (or a fixed seed) for deterministic runs.
    Reproducible,

    /// Reproducible, and verifies every incremental score against a full
    /// recalculation.
    FullAssert,
}

impl EnvironmentMode {
    pub fn is_reproducible(self) -> bool {
        !matches!(self, EnvironmentMode::NonReproducible)
    }

    pub fn is_asserted(self) -> bool {
        matches!(self, EnvironmentMode::FullAssert)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveThreadCount {
    /// Use the global rayon pool.
    #[default]
    Auto,

    /// Evaluate moves on the solving thread.
    None,

    /// A dedicated pool of this many threads.
    Count(usize),
}

/// Limits that stop a solve or phase; the first one reached wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    pub seconds_spent_limit: Option<u64>,

    pub minutes_spent_limit: Option<u64>,

    /// Target best score, e.g. `"0hard/0soft"`.
    pub best_score_limit: Option<String>,

    pub step_count_limit: Option<u64>,

    pub unimproved_step_count_limit: Option<u64>,

    pub unimproved_seconds_spent_limit: Option<u64>,
}

impl TerminationConfig {
    /// Seconds and minutes added together; `None` when both are unset or zero.
    pub fn time_limit(&self) -> Option<Duration> {
        let seconds =
            self.seconds_spent_limit.unwrap_or(0) + self.minutes_spent_limit.unwrap_or(0) * 60;
        (seconds > 0).then(|| Duration::from_secs(seconds))
    }

    pub fn unimproved_time_limit(&self) -> Option<Duration> {
        self.unimproved_seconds_spent_limit.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PhaseConfig {
    ConstructionHeuristic(ConstructionHeuristicConfig),
    LocalSearch(LocalSearchConfig),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ConstructionHeuristicConfig {
    #[serde(default)]
    pub construction_heuristic_type: ConstructionHeuristicType,
}

/// How the construction phase picks among a lesson's candidate placements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstructionHeuristicType {
    /// First placement that adds no hard penalty.
    #[default]
    FirstFit,

    /// Best-scoring placement.
    BestFit,
}

/// The improvement phase: how moves are sampled, accepted and picked.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LocalSearchConfig {
    pub acceptor: Option<AcceptorConfig>,

    pub forager: Option<ForagerConfig>,

    pub move_selector: Option<MoveSelectorConfig>,

    /// Moves sampled and scored per step.
    pub move_batch_size: Option<usize>,

    /// Phase-local termination, combined with the solver termination.
    pub termination: Option<TerminationConfig>,
}

impl LocalSearchConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.move_batch_size == Some(0) {
            return Err(ConfigError::Invalid(
                "move_batch_size must be at least 1".to_string(),
            ));
        }
        match &self.acceptor {
            Some(AcceptorConfig::LateAcceptance(la)) if la.late_acceptance_size == Some(0) => Err(
                ConfigError::Invalid("late_acceptance_size must be at least 1".to_string()),
            ),
            Some(AcceptorConfig::SimulatedAnnealing(sa)) => match sa.cooling_rate {
                Some(rate) if !(rate > 0.0 && rate < 1.0) => Err(ConfigError::Invalid(format!(
                    "cooling_rate must lie in (0, 1), got {}",
                    rate
                ))),
                _ => Ok(()),
            },
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AcceptorConfig {
    /// Accept only moves that strictly improve the step score.
    HillClimbing,

    SimulatedAnnealing(SimulatedAnnealingConfig),

    LateAcceptance(LateAcceptanceConfig),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SimulatedAnnealingConfig {
    pub starting_temperature: Option<f64>,

    /// Multiplier applied to the temperature after every step.
    pub cooling_rate: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LateAcceptanceConfig {
    pub late_acceptance_size: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ForagerConfig {
    /// Accepted moves gathered before the step picks the best of them.
    pub accepted_count_limit: Option<usize>,
}

/// Which planning variables a lesson move may touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LessonVariable {
    TimeSlot,
    Room,
    Teacher,
}

/// A tree of move selectors; unions pick a child at random per sample.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MoveSelectorConfig {
    /// Reassigns one variable of one lesson.
    ChangeMoveSelector(ChangeMoveConfig),

    /// Exchanges the time slot and room of two lessons.
    SwapMoveSelector,

    UnionMoveSelector(UnionMoveSelectorConfig),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ChangeMoveConfig {
    /// Restricts the selector to these variables; empty means all.
    #[serde(default)]
    pub variables: Vec<LessonVariable>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct UnionMoveSelectorConfig {
    pub selectors: Vec<MoveSelectorConfig>,
}
