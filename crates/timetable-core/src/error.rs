use thiserror::Error;

/// The planning problem itself is broken.
#[derive(Debug, Error)]
pub enum TimetableError {
    /// A lesson points at a fact that does not exist, or a candidate list
    /// leaves a required variable without values.
    #[error("domain model error: {0}")]
    DomainModel(String),
}

pub type Result<T> = std::result::Result<T, TimetableError>;
