//! Boundaries to the system that owns terms and lessons.

use std::collections::HashMap;
use std::error::Error;

use parking_lot::RwLock;
use timetable_core::TermId;

use crate::extractor::LessonRecord;
use crate::input::SchedulingInput;

pub type BoxError = Box<dyn Error + Send + Sync>;

/// Supplies the facts of a term. Read once, before a job starts.
pub trait ProblemSource: Send + Sync {
    fn load(&self, term_id: TermId) -> Result<SchedulingInput, BoxError>;
}

/// Persists the lessons of a finished job.
pub trait LessonSink: Send + Sync {
    /// Replaces all lessons stored for `term_id`.
    fn save(&self, term_id: TermId, lessons: &[LessonRecord]) -> Result<(), BoxError>;
}

/// A [`ProblemSource`] over inputs held in memory.
#[derive(Debug, Default)]
pub struct InMemoryProblemSource {
    inputs: RwLock<HashMap<TermId, SchedulingInput>>,
}

impl InMemoryProblemSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, input: SchedulingInput) {
        self.inputs.write().insert(input.term_id, input);
    }
}

impl ProblemSource for InMemoryProblemSource {
    fn load(&self, term_id: TermId) -> Result<SchedulingInput, BoxError> {
        self.inputs
            .read()
            .get(&term_id)
            .cloned()
            .ok_or_else(|| format!("no scheduling input for term {}", term_id).into())
    }
}

/// A [`LessonSink`] keeping the last saved lessons per term.
#[derive(Debug, Default)]
pub struct InMemoryLessonSink {
    lessons: RwLock<HashMap<TermId, Vec<LessonRecord>>>,
}

impl InMemoryLessonSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lessons(&self, term_id: TermId) -> Option<Vec<LessonRecord>> {
        self.lessons.read().get(&term_id).cloned()
    }
}

impl LessonSink for InMemoryLessonSink {
    fn save(&self, term_id: TermId, lessons: &[LessonRecord]) -> Result<(), BoxError> {
        self.lessons.write().insert(term_id, lessons.to_vec());
        Ok(())
    }
}
