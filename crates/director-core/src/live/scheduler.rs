//! Run lifecycle for the live pass.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use tracing::{info, warn};

use director_protocols::{
    ActionAdapter, AudioPlayback, PlaybackHandle, Scenario, ScheduleError, Stage,
};

use super::adapter::tolerate;
use super::{LiveAdapter, LiveOptions, ScheduleState};
use crate::inference::InferredDuration;

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;

/// Live run state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// Not started.
    Idle,
    /// Zero fixed, scenario executing.
    Running,
    /// Scenario exhausted and the closing fence reached.
    Finished,
}

/// Summary of a completed live run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// System time of the shared zero.
    pub wall_zero: SystemTime,
    /// Wall time from zero to the closing fence.
    pub elapsed: Duration,
    pub duration: InferredDuration,
    pub late_anchors: usize,
    pub max_lateness: Duration,
    /// Whether master audio playback was running.
    pub narrated: bool,
}

/// Replays a scenario live, aligned to a zero shared with audio playback.
pub struct LiveScheduler {
    stage: Arc<dyn Stage>,
    options: LiveOptions,
    narration: Option<(Arc<dyn AudioPlayback>, PathBuf)>,
    phase: RunPhase,
}

impl LiveScheduler {
    pub fn new(stage: Arc<dyn Stage>, options: LiveOptions) -> Self {
        Self {
            stage,
            options,
            narration: None,
            phase: RunPhase::Idle,
        }
    }

    /// Play `master` through `player` from the shared zero.
    pub fn with_narration(mut self, player: Arc<dyn AudioPlayback>, master: PathBuf) -> Self {
        self.narration = Some((player, master));
        self
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn options(&self) -> &LiveOptions {
        &self.options
    }

    /// Run `scenario` once, then hold until `duration` has elapsed.
    ///
    /// A failed run leaves the scheduler in `Running`; it cannot be restarted.
    pub async fn run(
        &mut self,
        scenario: &dyn Scenario,
        duration: InferredDuration,
    ) -> Result<RunReport, ScheduleError> {
        if self.phase != RunPhase::Idle {
            return Err(ScheduleError::AlreadyStarted);
        }

        let mut state = ScheduleState::start();
        self.phase = RunPhase::Running;
        info!(steps = scenario.len(), duration = %duration, "Live run started");

        let mut playback = self.start_playback().await;
        let narrated = playback.is_some();

        let result = self.drive(scenario, duration, &mut state).await;

        if let Some(handle) = playback.as_mut() {
            handle.stop();
        }
        result?;

        self.phase = RunPhase::Finished;
        let report = RunReport {
            wall_zero: state.wall_zero(),
            elapsed: state.elapsed(),
            duration,
            late_anchors: state.late_anchors(),
            max_lateness: state.max_lateness(),
            narrated,
        };
        info!(
            elapsed_ms = report.elapsed.as_millis() as u64,
            late_anchors = report.late_anchors,
            max_lateness_ms = report.max_lateness.as_millis() as u64,
            "Live run finished"
        );
        Ok(report)
    }

    async fn start_playback(&self) -> Option<Box<dyn PlaybackHandle>> {
        let (player, master) = self.narration.as_ref()?;
        match player.start(master).await {
            Ok(handle) => Some(handle),
            Err(e) => {
                warn!(error = %e, "Narration playback failed to start, recording without audio");
                None
            }
        }
    }

    async fn drive(
        &self,
        scenario: &dyn Scenario,
        duration: InferredDuration,
        state: &mut ScheduleState,
    ) -> Result<(), ScheduleError> {
        tolerate(
            self.stage.start_clock(duration.as_duration()).await,
            "progress clock",
        )?;

        let mut adapter = LiveAdapter::new(Arc::clone(&self.stage), state, &self.options);
        scenario.run(&mut adapter).await?;
        // Keep capturing until the inferred end even if the script finished early.
        adapter.at(duration.as_secs_f64()).await
    }
}
