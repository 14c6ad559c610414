//! The action adapter capability and the scenario trait that consumes it.

use async_trait::async_trait;

use crate::error::ScheduleError;
use crate::types::ScrollTarget;

/// Subtitle display length used when a step does not specify one.
pub const DEFAULT_SAY_DURATION_MS: u64 = 4000;

/// The five primitives a scenario is written against.
///
/// Two implementations exist: a dry-run adapter that only records timing and a
/// live adapter that performs real side effects aligned to a wall clock. A
/// scenario cannot tell which one it is driving.
#[async_trait]
pub trait ActionAdapter: Send {
    /// Move the logical clock to `seconds` from scenario start.
    async fn at(&mut self, seconds: f64) -> Result<(), ScheduleError>;

    /// Narrate `text`, showing it as a subtitle for `display_ms`.
    async fn say(&mut self, text: &str, display_ms: u64) -> Result<(), ScheduleError>;

    /// Activate the element whose visible text matches `target`.
    async fn click(&mut self, target: &str) -> Result<(), ScheduleError>;

    /// Animate the most relevant scrollable surface to the target offset.
    async fn scroll(&mut self, target: ScrollTarget) -> Result<(), ScheduleError>;

    /// Pause for `ms` milliseconds.
    async fn wait(&mut self, ms: u64) -> Result<(), ScheduleError>;
}

/// A replayable sequence of adapter calls.
///
/// Implementations must issue the same call sequence every time they run;
/// timing inference relies on it.
#[async_trait]
pub trait Scenario: Send + Sync {
    /// Number of steps, for progress logging.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    async fn run(&self, actions: &mut dyn ActionAdapter) -> Result<(), ScheduleError>;
}
