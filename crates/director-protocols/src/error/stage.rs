//! Stage (host) errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StageError {
    #[error("Target not found: {0}")]
    NotFound(String),

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Page script failed: {0}")]
    Script(String),

    #[error("Host unavailable: {0}")]
    Host(String),
}

impl StageError {
    /// Whether this error only concerns one target and the run can go on.
    pub fn is_resolution(&self) -> bool {
        matches!(self, StageError::NotFound(_) | StageError::Timeout(_))
    }
}
