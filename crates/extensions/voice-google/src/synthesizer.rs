//! [`Synthesizer`] backed by Google Translate TTS.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use director_protocols::{SynthesisError, SynthesisRequest, Synthesizer};

use crate::client::GoogleTtsClient;
use crate::split::{split_text, MAX_CHUNK_CHARS};

/// Google Translate TTS synthesizer.
pub struct GoogleSynthesizer {
    client: GoogleTtsClient,
    slow: bool,
}

impl GoogleSynthesizer {
    pub fn new(host: impl Into<String>, slow: bool, timeout: Duration) -> Result<Self, SynthesisError> {
        Ok(Self {
            client: GoogleTtsClient::new(host, timeout)?,
            slow,
        })
    }
}

#[async_trait]
impl Synthesizer for GoogleSynthesizer {
    fn id(&self) -> &str {
        "google"
    }

    async fn synthesize(
        &self,
        request: &SynthesisRequest,
        output: &Path,
    ) -> Result<(), SynthesisError> {
        let chunks = split_text(&request.text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(SynthesisError::EmptyAudio(request.text.clone()));
        }

        // MP3 frames are self-delimiting, so the responses concatenate cleanly.
        let mut audio = Vec::new();
        for chunk in &chunks {
            audio.extend(self.client.fetch(chunk, &request.voice, self.slow).await?);
        }

        tokio::fs::write(output, &audio).await?;
        debug!(
            "Synthesized {} chunk(s), {} bytes -> {}",
            chunks.len(),
            audio.len(),
            output.display()
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "synthesizer_tests.rs"]
mod tests;
