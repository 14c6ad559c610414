//! Audio tooling traits: mixing, probing and background playback.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::MediaError;

/// One clip placed on the master timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct MixInput {
    pub path: PathBuf,
    pub delay_ms: u64,
}

/// Everything needed to build the master audio track.
#[derive(Debug, Clone, PartialEq)]
pub struct MixPlan {
    /// Length of the silent base track in seconds; the mix is bounded by it.
    pub length: f64,
    pub inputs: Vec<MixInput>,
}

impl MixPlan {
    pub fn silent(length: f64) -> Self {
        Self {
            length,
            inputs: Vec::new(),
        }
    }
}

/// External audio mixer.
#[async_trait]
pub trait AudioMixer: Send + Sync {
    /// Duration of an audio file in seconds.
    async fn measure_duration(&self, path: &Path) -> Result<f64, MediaError>;

    /// Sum all inputs over a silent base and write the result to `output`.
    async fn mix(&self, plan: &MixPlan, output: &Path) -> Result<(), MediaError>;
}

/// A running playback; stopping it is best effort.
pub trait PlaybackHandle: Send {
    fn stop(&mut self);
}

/// Starts audio playback in the background.
#[async_trait]
pub trait AudioPlayback: Send + Sync {
    /// Begin playing `path`. Returns once playback has been launched, not finished.
    async fn start(&self, path: &Path) -> Result<Box<dyn PlaybackHandle>, MediaError>;
}
