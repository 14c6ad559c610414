//! [`AudioMixer`] backed by ffmpeg and ffprobe.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use director_protocols::{AudioMixer, MediaError, MixPlan};

use crate::args::{mix_args, duration_args};
use crate::runner::{SystemRunner, ToolRunner};

/// Mixes narration clips with ffmpeg and measures them with ffprobe.
pub struct FfmpegMixer {
    ffmpeg: String,
    ffprobe: String,
    runner: Arc<dyn ToolRunner>,
}

impl FfmpegMixer {
    pub fn new(ffmpeg: impl Into<String>, ffprobe: impl Into<String>) -> Self {
        Self::with_runner(ffmpeg, ffprobe, Arc::new(SystemRunner))
    }

    pub fn with_runner(
        ffmpeg: impl Into<String>,
        ffprobe: impl Into<String>,
        runner: Arc<dyn ToolRunner>,
    ) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            ffprobe: ffprobe.into(),
            runner,
        }
    }
}

/// Parse ffprobe's bare duration output.
pub(crate) fn parse_duration(stdout: &str) -> Option<f64> {
    stdout
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|d| d.is_finite() && *d >= 0.0)
}

#[async_trait]
impl AudioMixer for FfmpegMixer {
    async fn measure_duration(&self, path: &Path) -> Result<f64, MediaError> {
        let stdout = self.runner.run(&self.ffprobe, &duration_args(path)).await?;
        let duration =
            parse_duration(&stdout).ok_or_else(|| MediaError::UnknownDuration(path.display().to_string()))?;
        debug!("{} lasts {:.2}s", path.display(), duration);
        Ok(duration)
    }

    async fn mix(&self, plan: &MixPlan, output: &Path) -> Result<(), MediaError> {
        self.runner.run(&self.ffmpeg, &mix_args(plan, output)).await?;
        info!(
            clips = plan.inputs.len(),
            length = plan.length,
            "Master audio written to {}",
            output.display()
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "mixer_tests.rs"]
mod tests;
