//! Duration inference: replay a scenario without side effects.
//!
//! The dry run walks the exact call sequence the live run will issue and
//! records two things: every narration cue at its logical offset, and the
//! latest point any cue, wait or anchor reaches. The inferred duration fixes
//! the master audio length and the final trim before recording starts.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use director_protocols::{ActionAdapter, Cue, Scenario, ScheduleError, ScrollTarget};

#[cfg(test)]
#[path = "inference_tests.rs"]
mod tests;

/// Seconds added past the latest event.
pub const DURATION_BUFFER_SECS: u64 = 2;

/// Total scenario length in whole seconds, buffer included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct InferredDuration(u64);

impl InferredDuration {
    /// `ceil(max_time) + 2`; negative watermarks count as zero, huge ones saturate.
    pub fn from_max_time(max_time: f64) -> Self {
        Self((max_time.max(0.0).ceil() as u64).saturating_add(DURATION_BUFFER_SECS))
    }

    pub fn secs(&self) -> u64 {
        self.0
    }

    pub fn as_secs_f64(&self) -> f64 {
        self.0 as f64
    }

    pub fn as_duration(&self) -> Duration {
        Duration::from_secs(self.0)
    }
}

impl fmt::Display for InferredDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

/// Result of a dry run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Inference {
    pub cues: Vec<Cue>,
    /// Latest cue end, wait end or anchor, in seconds.
    pub max_time: f64,
    pub duration: InferredDuration,
}

/// Adapter that only keeps time.
#[derive(Debug, Default)]
pub struct DryRunAdapter {
    current_offset: f64,
    max_time: f64,
    cues: Vec<Cue>,
}

impl DryRunAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_offset(&self) -> f64 {
        self.current_offset
    }

    pub fn max_time(&self) -> f64 {
        self.max_time
    }

    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    fn extend_to(&mut self, end: f64) {
        self.max_time = self.max_time.max(end);
    }

    pub fn finish(self) -> Inference {
        Inference {
            duration: InferredDuration::from_max_time(self.max_time),
            max_time: self.max_time,
            cues: self.cues,
        }
    }
}

#[async_trait]
impl ActionAdapter for DryRunAdapter {
    async fn at(&mut self, seconds: f64) -> Result<(), ScheduleError> {
        if !seconds.is_finite() {
            return Err(ScheduleError::InvalidTime(seconds));
        }
        // An earlier anchor moves the offset back; the watermark never shrinks.
        self.current_offset = seconds;
        self.extend_to(seconds);
        Ok(())
    }

    async fn say(&mut self, text: &str, display_ms: u64) -> Result<(), ScheduleError> {
        let cue = Cue::new(text, self.current_offset, self.cues.len(), display_ms);
        self.extend_to(cue.display_end());
        self.cues.push(cue);
        Ok(())
    }

    async fn click(&mut self, _target: &str) -> Result<(), ScheduleError> {
        Ok(())
    }

    async fn scroll(&mut self, _target: ScrollTarget) -> Result<(), ScheduleError> {
        Ok(())
    }

    async fn wait(&mut self, ms: u64) -> Result<(), ScheduleError> {
        self.extend_to(self.current_offset + ms as f64 / 1000.0);
        Ok(())
    }
}

/// Run `scenario` through a fresh dry-run adapter.
pub async fn infer(scenario: &dyn Scenario) -> Result<Inference, ScheduleError> {
    let mut adapter = DryRunAdapter::new();
    scenario.run(&mut adapter).await?;
    let inference = adapter.finish();
    debug!(
        cues = inference.cues.len(),
        max_time = inference.max_time,
        duration = %inference.duration,
        "Inferred scenario duration"
    );
    Ok(inference)
}
