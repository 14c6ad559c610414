//! Stage trait definition.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::StageError;
use crate::types::{Point, Rect, SurfaceMetrics, SurfaceRef};

/// Host-specific visual operations the live adapter is built from.
///
/// A stage is a thin layer over whatever renders the recorded page. Timing,
/// easing and target selection policy stay in the core; the stage only
/// measures and mutates.
#[async_trait]
pub trait Stage: Send + Sync {
    /// Reset the on-screen timer and progress bar against `total`.
    async fn start_clock(&self, total: Duration) -> Result<(), StageError>;

    /// Show `text` in the subtitle box until hidden or replaced.
    async fn show_subtitle(&self, text: &str) -> Result<(), StageError>;

    async fn hide_subtitle(&self) -> Result<(), StageError>;

    /// Find a visible element whose text matches `target`, polling up to `timeout`.
    async fn locate(&self, target: &str, timeout: Duration) -> Result<Rect, StageError>;

    /// Show the cursor halo at `at`.
    async fn show_pointer(&self, at: Point) -> Result<(), StageError>;

    /// Move the input pointer to `to` in `steps` intermediate moves.
    async fn move_pointer(&self, to: Point, steps: u32) -> Result<(), StageError>;

    /// Press and release the primary button at `at`, holding for `hold`.
    async fn press(&self, at: Point, hold: Duration) -> Result<(), StageError>;

    async fn hide_pointer(&self) -> Result<(), StageError>;

    /// Activate the element matching `target` directly, without pointer input.
    async fn activate_direct(&self, target: &str) -> Result<(), StageError>;

    /// Enumerate elements with `overflow-y: auto|scroll`.
    async fn scroll_candidates(&self) -> Result<Vec<SurfaceMetrics>, StageError>;

    /// Current scroll offset of `surface`.
    async fn scroll_offset(&self, surface: SurfaceRef) -> Result<Point, StageError>;

    async fn set_scroll_offset(&self, surface: SurfaceRef, to: Point) -> Result<(), StageError>;
}
