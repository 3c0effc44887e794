//! Background solving jobs, one per term at a time.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use timetable_config::{
    AcceptorConfig, LateAcceptanceConfig, LocalSearchConfig, PhaseConfig, SolverConfig,
};
use timetable_core::{HardSoftScore, TermId, Timetable};
use timetable_solver::{SolveResult, Solver, SolverBuilder, SolverError};
use tokio::runtime::{Handle, TryCurrentError};
use tokio::sync::watch;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::assembler::{assemble, ProblemAssemblyError};
use crate::extractor::{extract, LessonRecord, UnresolvedAssignmentError};
use crate::store::{BoxError, LessonSink, ProblemSource};

/// Default termination: 30 seconds
const DEFAULT_TERMINATION_SECONDS: u64 = 30;

/// Default late acceptance size.
const DEFAULT_LATE_ACCEPTANCE_SIZE: usize = 400;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(Uuid);

impl JobId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobState {
    Pending,
    Running,
    Succeeded,
    Failed,
    Cancelled,
}

impl JobState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed | Self::Cancelled)
    }
}

/// Snapshot of a job, published on every change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveStatus {
    pub state: JobState,
    /// Hard score of the best timetable so far.
    pub hard_score: Option<i64>,
    pub soft_score: Option<i64>,
    /// Why the job failed.
    pub message: Option<String>,
}

impl SolveStatus {
    fn new(state: JobState, score: Option<HardSoftScore>) -> Self {
        Self {
            state,
            hard_score: score.map(|s| s.hard()),
            soft_score: score.map(|s| s.soft()),
            message: None,
        }
    }

    fn failed(score: Option<HardSoftScore>, message: String) -> Self {
        Self {
            message: Some(message),
            ..Self::new(JobState::Failed, score)
        }
    }

    pub fn score(&self) -> Option<HardSoftScore> {
        Some(HardSoftScore::of(self.hard_score?, self.soft_score?))
    }
}

#[derive(Debug, Error)]
pub enum SolveError {
    #[error(transparent)]
    Assembly(#[from] ProblemAssemblyError),

    #[error("term {0} already has an active solve")]
    AlreadySolving(TermId),

    #[error("problem source failed: {0}")]
    Source(BoxError),

    #[error(transparent)]
    Extraction(#[from] UnresolvedAssignmentError),

    #[error("lesson sink failed: {0}")]
    Persistence(BoxError),

    #[error("unknown job {0}")]
    UnknownJob(JobId),

    #[error("job {0} has not finished")]
    JobActive(JobId),

    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error("solving jobs need a Tokio runtime: {0}")]
    Runtime(#[from] TryCurrentError),
}

struct Job {
    term_id: TermId,
    terminate: Arc<AtomicBool>,
    status: watch::Sender<SolveStatus>,
    lessons: RwLock<Option<Vec<LessonRecord>>>,
}

impl Job {
    fn publish(&self, status: SolveStatus) {
        self.status.send_replace(status);
    }

    fn state(&self) -> JobState {
        self.status.borrow().state
    }
}

#[derive(Default)]
struct Registry {
    jobs: HashMap<JobId, Arc<Job>>,
    active: HashMap<TermId, JobId>,
}

/// Runs timetable solves in the background.
///
/// Facts come from the [`ProblemSource`] when a job starts; lessons go to
/// the [`LessonSink`] when it finishes. A term has at most one active job.
/// Each job runs on Tokio's blocking pool, so `start_solve` must be called
/// from within a runtime.
pub struct SolverManager {
    source: Arc<dyn ProblemSource>,
    sink: Arc<dyn LessonSink>,
    config: SolverConfig,
    registry: Arc<RwLock<Registry>>,
}

impl SolverManager {
    /// Creates a manager with the default configuration.
    ///
    /// Default: 30 seconds termination, Late Acceptance with size 400.
    pub fn new(source: Arc<dyn ProblemSource>, sink: Arc<dyn LessonSink>) -> Self {
        Self {
            source,
            sink,
            config: Self::default_config(),
            registry: Arc::new(RwLock::new(Registry::default())),
        }
    }

    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn default_config() -> SolverConfig {
        SolverConfig::new()
            .with_termination_seconds(DEFAULT_TERMINATION_SECONDS)
            .with_phase(PhaseConfig::ConstructionHeuristic(Default::default()))
            .with_phase(PhaseConfig::LocalSearch(LocalSearchConfig {
                acceptor: Some(AcceptorConfig::LateAcceptance(LateAcceptanceConfig {
                    late_acceptance_size: Some(DEFAULT_LATE_ACCEPTANCE_SIZE),
                })),
                ..LocalSearchConfig::default()
            }))
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Loads and assembles the term, then solves it in the background.
    ///
    /// Assembly and configuration errors surface here, before a job exists.
    pub fn start_solve(&self, term_id: TermId) -> Result<JobId, SolveError> {
        let runtime = Handle::try_current()?;
        if self.registry.read().active.contains_key(&term_id) {
            return Err(SolveError::AlreadySolving(term_id));
        }

        let input = self.source.load(term_id).map_err(SolveError::Source)?;
        let timetable = assemble(&input, self.config.allow_unresourced)?;
        let builder = SolverBuilder::from_config(&self.config)?;

        let job_id = JobId::new();
        let (status, _) = watch::channel(SolveStatus::new(JobState::Pending, None));
        let job = Arc::new(Job {
            term_id,
            terminate: Arc::new(AtomicBool::new(false)),
            status,
            lessons: RwLock::new(None),
        });
        {
            let mut registry = self.registry.write();
            if registry.active.contains_key(&term_id) {
                return Err(SolveError::AlreadySolving(term_id));
            }
            registry.active.insert(term_id, job_id);
            registry.jobs.insert(job_id, Arc::clone(&job));
        }

        let listener_job = Arc::clone(&job);
        let solver = builder
            .with_terminate_flag(Arc::clone(&job.terminate))
            .with_best_score_listener(move |score| {
                listener_job.publish(SolveStatus::new(JobState::Running, Some(score)))
            })
            .build();

        info!(
            event = "job_start",
            job_id = %job_id,
            term_id = %term_id,
            lessons = timetable.lessons.len(),
        );
        let sink = Arc::clone(&self.sink);
        let registry = Arc::clone(&self.registry);
        runtime.spawn_blocking(move || {
            let status = run_job(&job, solver, timetable, sink.as_ref());
            info!(
                event = "job_end",
                job_id = %job_id,
                term_id = %job.term_id,
                state = ?status.state,
                hard_score = ?status.hard_score,
                soft_score = ?status.soft_score,
            );
            // Freeing the term and publishing the final state happen together.
            let mut guard = registry.write();
            guard.active.remove(&job.term_id);
            job.publish(status);
        });

        Ok(job_id)
    }

    pub fn get_solve_status(&self, job_id: JobId) -> Option<SolveStatus> {
        let job = self.registry.read().jobs.get(&job_id).cloned()?;
        let status = job.status.borrow().clone();
        Some(status)
    }

    /// Asks a pending or running job to stop. The job keeps its best
    /// timetable and ends as [`JobState::Cancelled`].
    ///
    /// Returns false for unknown or already finished jobs.
    pub fn cancel_solve(&self, job_id: JobId) -> bool {
        let registry = self.registry.read();
        let Some(job) = registry.jobs.get(&job_id) else {
            return false;
        };
        if registry.active.get(&job.term_id) != Some(&job_id) {
            return false;
        }
        job.terminate.store(true, Ordering::SeqCst);
        info!(event = "job_cancel", job_id = %job_id, term_id = %job.term_id);
        true
    }

    /// Watches a job's status as it changes.
    pub fn subscribe(&self, job_id: JobId) -> Result<watch::Receiver<SolveStatus>, SolveError> {
        self.registry
            .read()
            .jobs
            .get(&job_id)
            .map(|job| job.status.subscribe())
            .ok_or(SolveError::UnknownJob(job_id))
    }

    /// Lessons saved by a finished job.
    pub fn lessons(&self, job_id: JobId) -> Option<Vec<LessonRecord>> {
        let job = self.registry.read().jobs.get(&job_id).cloned()?;
        let lessons = job.lessons.read().clone();
        lessons
    }

    /// Forgets a finished job and hands back its saved lessons.
    ///
    /// Jobs that are still pending or running cannot be removed; cancel
    /// them first.
    pub fn remove_job(&self, job_id: JobId) -> Result<Option<Vec<LessonRecord>>, SolveError> {
        let mut registry = self.registry.write();
        let job = registry
            .jobs
            .get(&job_id)
            .ok_or(SolveError::UnknownJob(job_id))?;
        if !job.state().is_terminal() {
            return Err(SolveError::JobActive(job_id));
        }
        let job = registry
            .jobs
            .remove(&job_id)
            .ok_or(SolveError::UnknownJob(job_id))?;
        let lessons = job.lessons.write().take();
        Ok(lessons)
    }

    /// Every job still known to the manager, finished or not.
    pub fn list_jobs(&self) -> Vec<JobId> {
        self.registry.read().jobs.keys().copied().collect()
    }

    /// The active job of a term, if one is running.
    pub fn active_job(&self, term_id: TermId) -> Option<JobId> {
        self.registry.read().active.get(&term_id).copied()
    }
}

impl fmt::Debug for SolverManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.registry.read();
        f.debug_struct("SolverManager")
            .field("config", &self.config)
            .field("jobs", &registry.jobs.len())
            .field("active", &registry.active.len())
            .finish()
    }
}

/// Solves, extracts and persists one job; returns its final status.
fn run_job(job: &Job, solver: Solver, timetable: Timetable, sink: &dyn LessonSink) -> SolveStatus {
    if !job.terminate.load(Ordering::SeqCst) {
        job.publish(SolveStatus::new(JobState::Running, None));
    }

    let result = match solver.solve(timetable) {
        Ok(result) => result,
        Err(e) => {
            error!(event = "job_failed", term_id = %job.term_id, error = %e);
            return SolveStatus::failed(None, e.to_string());
        }
    };
    let score = Some(result.score);

    if result.is_cancelled() {
        // A cancel during construction can leave lessons unplaced; keep
        // whatever is already stored in that case.
        if let Err(e) = persist(job, &result, sink) {
            warn!(event = "cancelled_not_persisted", term_id = %job.term_id, error = %e);
        }
        return SolveStatus::new(JobState::Cancelled, score);
    }

    match persist(job, &result, sink) {
        Ok(()) => SolveStatus::new(JobState::Succeeded, score),
        Err(e) => {
            error!(event = "job_failed", term_id = %job.term_id, error = %e);
            SolveStatus::failed(score, e.to_string())
        }
    }
}

fn persist(job: &Job, result: &SolveResult, sink: &dyn LessonSink) -> Result<(), SolveError> {
    let lessons = extract(&result.solution)?;
    sink.save(job.term_id, &lessons)
        .map_err(SolveError::Persistence)?;
    *job.lessons.write() = Some(lessons);
    Ok(())
}
