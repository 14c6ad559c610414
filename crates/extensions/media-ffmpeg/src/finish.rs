//! Capture encoding and the finishing encode.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use director_protocols::MediaError;

use crate::args::{encode_args, finish_args, EncodeSettings, FinishJob};
use crate::runner::{SystemRunner, ToolRunner};

/// Produces the raw capture and the final video with ffmpeg.
pub struct Finisher {
    ffmpeg: String,
    settings: EncodeSettings,
    runner: Arc<dyn ToolRunner>,
}

impl Finisher {
    pub fn new(ffmpeg: impl Into<String>, settings: EncodeSettings) -> Self {
        Self::with_runner(ffmpeg, settings, Arc::new(SystemRunner))
    }

    pub fn with_runner(
        ffmpeg: impl Into<String>,
        settings: EncodeSettings,
        runner: Arc<dyn ToolRunner>,
    ) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            settings,
            runner,
        }
    }

    pub fn settings(&self) -> &EncodeSettings {
        &self.settings
    }

    /// Encode the frame manifest into a constant-frame-rate video.
    pub async fn encode_capture(&self, manifest: &Path, output: &Path) -> Result<(), MediaError> {
        self.runner
            .run(&self.ffmpeg, &encode_args(manifest, &self.settings, output))
            .await?;
        info!("Raw capture encoded to {}", output.display());
        Ok(())
    }

    /// Trim, scale and mux the final video.
    pub async fn finish(&self, job: &FinishJob) -> Result<(), MediaError> {
        self.runner
            .run(&self.ffmpeg, &finish_args(job, &self.settings))
            .await?;
        info!(
            narrated = job.master.is_some(),
            lead_in = job.lead_in,
            duration = job.duration,
            "Final video written to {}",
            job.output.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::test_runner::FakeRunner;

    #[tokio::test]
    async fn test_encode_capture() {
        let runner = Arc::new(FakeRunner::replying(""));
        let finisher = Finisher::with_runner("ffmpeg", EncodeSettings::default(), runner.clone());

        finisher
            .encode_capture(Path::new("/c/frames.ffconcat"), Path::new("/o/raw.mp4"))
            .await
            .unwrap();

        let calls = runner.calls();
        assert!(calls[0].1.contains(&"/c/frames.ffconcat".to_string()));
    }

    #[tokio::test]
    async fn test_finish_failure_is_reported() {
        let runner = Arc::new(FakeRunner::failing("Conversion failed!"));
        let finisher = Finisher::with_runner("ffmpeg", EncodeSettings::default(), runner);
        let job = FinishJob {
            raw: PathBuf::from("/o/raw.mp4"),
            master: None,
            lead_in: 0.0,
            duration: 14.0,
            output: PathBuf::from("/o/final.mp4"),
        };

        let err = finisher.finish(&job).await.unwrap_err();
        assert!(matches!(err, MediaError::Failed { ref stderr, .. } if stderr == "Conversion failed!"));
    }
}
