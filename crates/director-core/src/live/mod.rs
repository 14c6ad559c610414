//! Live execution: wall-clock alignment against a shared zero.
//!
//! [`ScheduleState`] owns the zero instant and the subtitle hide timer and is
//! threaded explicitly through the live adapter. [`LiveScheduler`] drives a
//! scenario through it and owns the run lifecycle.

use std::time::{Duration, SystemTime};

use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::debug;

use director_protocols::ScheduleError;

mod adapter;
mod scheduler;

pub use adapter::LiveAdapter;
pub use scheduler::{LiveScheduler, RunPhase, RunReport};

#[cfg(test)]
pub(crate) mod test_stage;

#[cfg(test)]
#[path = "live_tests.rs"]
mod tests;

/// Knobs for the live pass.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveOptions {
    /// Seconds added to every anchor before alignment.
    pub audio_offset: f64,
    /// Bounded wait for a click target to become visible.
    pub visibility_timeout: Duration,
    /// Scroll animation sampling rate.
    pub frame_rate: u32,
    /// Pause after a click before the pointer halo hides.
    pub click_settle: Duration,
    /// Intermediate pointer moves on the way to a click target.
    pub pointer_steps: u32,
    /// Mouse button hold time.
    pub press_hold: Duration,
}

impl Default for LiveOptions {
    fn default() -> Self {
        Self {
            audio_offset: 0.0,
            visibility_timeout: Duration::from_millis(5000),
            frame_rate: 60,
            click_settle: Duration::from_millis(500),
            pointer_steps: 8,
            press_hold: Duration::from_millis(100),
        }
    }
}

/// Outcome of aligning one anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    /// Suspended until the anchor came due.
    Waited(Duration),
    /// The anchor had already passed by this much; nothing was done.
    Late(Duration),
}

/// Per-run timing state, created when the run enters `Running`.
#[derive(Debug)]
pub struct ScheduleState {
    zero: Instant,
    wall_zero: SystemTime,
    last_logical: f64,
    late_anchors: usize,
    max_lateness: Duration,
    subtitle_timer: Option<JoinHandle<()>>,
}

impl ScheduleState {
    /// Fix the zero point at the current instant.
    pub fn start() -> Self {
        Self {
            zero: Instant::now(),
            wall_zero: SystemTime::now(),
            last_logical: 0.0,
            late_anchors: 0,
            max_lateness: Duration::ZERO,
            subtitle_timer: None,
        }
    }

    pub fn zero(&self) -> Instant {
        self.zero
    }

    /// System time of the zero point, used to line up captured frames.
    pub fn wall_zero(&self) -> SystemTime {
        self.wall_zero
    }

    pub fn elapsed(&self) -> Duration {
        self.zero.elapsed()
    }

    /// The most recent anchor passed to [`align`](Self::align).
    pub fn last_logical(&self) -> f64 {
        self.last_logical
    }

    /// Anchors that arrived after their deadline.
    pub fn late_anchors(&self) -> usize {
        self.late_anchors
    }

    /// Worst observed lateness. Drift is never corrected backwards.
    pub fn max_lateness(&self) -> Duration {
        self.max_lateness
    }

    /// Suspend until `seconds + offset` after zero, or return at once if that has passed.
    pub async fn align(&mut self, seconds: f64, offset: f64) -> Result<Alignment, ScheduleError> {
        if !seconds.is_finite() {
            return Err(ScheduleError::InvalidTime(seconds));
        }
        let target = seconds + offset;
        let from_zero = Duration::try_from_secs_f64(target.max(0.0))
            .map_err(|_| ScheduleError::InvalidTime(seconds))?;

        let deadline = self
            .zero
            .checked_add(from_zero)
            .ok_or(ScheduleError::InvalidTime(seconds))?;
        self.last_logical = seconds;
        let now = Instant::now();

        if deadline > now {
            sleep_until(deadline).await;
            return Ok(Alignment::Waited(deadline - now));
        }

        let late = now - deadline;
        if !late.is_zero() {
            self.late_anchors += 1;
            self.max_lateness = self.max_lateness.max(late);
            debug!(
                anchor = seconds,
                late_ms = late.as_millis() as u64,
                "Anchor already passed"
            );
        }
        Ok(Alignment::Late(late))
    }

    /// Install the hide timer for the current subtitle, cancelling the previous one.
    pub(crate) fn replace_subtitle_timer(&mut self, timer: JoinHandle<()>) {
        if let Some(previous) = self.subtitle_timer.replace(timer) {
            previous.abort();
        }
    }

    fn cancel_timers(&mut self) {
        if let Some(timer) = self.subtitle_timer.take() {
            timer.abort();
        }
    }
}

impl Drop for ScheduleState {
    fn drop(&mut self) {
        self.cancel_timers();
    }
}
