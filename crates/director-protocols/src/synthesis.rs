//! Synthesizer trait definition.

use std::path::Path;

use async_trait::async_trait;

use crate::error::SynthesisError;

/// One text-to-speech job.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    pub text: String,
    /// Language code or backend-specific voice name.
    pub voice: String,
}

impl SynthesisRequest {
    pub fn new(text: impl Into<String>, voice: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice: voice.into(),
        }
    }
}

/// Renders text to an audio file.
#[async_trait]
pub trait Synthesizer: Send + Sync {
    /// Returns the backend ID.
    fn id(&self) -> &str;

    /// File extension of the produced audio.
    fn extension(&self) -> &str {
        "mp3"
    }

    /// Render `request` into `output`, replacing any existing file.
    async fn synthesize(
        &self,
        request: &SynthesisRequest,
        output: &Path,
    ) -> Result<(), SynthesisError>;
}
