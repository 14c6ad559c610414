//! Text-to-speech errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Synthesis service returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Synthesis produced no audio for: {0}")]
    EmptyAudio(String),

    #[error("Synthesis command failed: {0}")]
    Command(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthesis_error_status() {
        let err = SynthesisError::Status {
            status: 429,
            message: "Too Many Requests".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("429"));
        assert!(display.contains("Too Many Requests"));
    }

    #[test]
    fn test_synthesis_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: SynthesisError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_synthesis_error_empty_audio() {
        let err = SynthesisError::EmptyAudio("Hello".to_string());
        assert!(err.to_string().contains("no audio"));
    }
}
