//! Scheduling errors raised while a scenario runs.

use thiserror::Error;

use super::StageError;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("Stage error: {0}")]
    Stage(#[from] StageError),

    #[error("Invalid time value: {0}")]
    InvalidTime(f64),

    #[error("Scenario failed: {0}")]
    Scenario(String),

    #[error("Live run already started")]
    AlreadyStarted,
}
