//! External media tool errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Failed to launch {tool}: {message}")]
    Spawn { tool: String, message: String },

    #[error("{tool} exited with status {status}: {stderr}")]
    Failed {
        tool: String,
        status: i32,
        stderr: String,
    },

    #[error("Could not read duration of {0}")]
    UnknownDuration(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
