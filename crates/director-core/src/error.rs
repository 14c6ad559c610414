//! Timeline loading errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("Scenario file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read scenario {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid scenario {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Step {index}: {message}")]
    InvalidStep { index: usize, message: String },
}
