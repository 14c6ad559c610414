//! Live run configuration.

use serde::{Deserialize, Serialize};

use super::default_true;

/// Settings for the live (recording) pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveConfig {
    /// How long a click waits for its target to become visible.
    #[serde(default = "default_visibility_timeout")]
    pub visibility_timeout_ms: u64,

    /// Scroll animation sampling rate.
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,

    /// Wait for ENTER before starting the run.
    #[serde(default = "default_true")]
    pub prompt: bool,

    /// Show the timer and progress bar overlay.
    #[serde(default = "default_true")]
    pub progress_overlay: bool,

    /// Pause after a click before the cursor halo is hidden.
    #[serde(default = "default_click_settle")]
    pub click_settle_ms: u64,
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self {
            visibility_timeout_ms: default_visibility_timeout(),
            frame_rate: default_frame_rate(),
            prompt: true,
            progress_overlay: true,
            click_settle_ms: default_click_settle(),
        }
    }
}

fn default_visibility_timeout() -> u64 {
    5000
}

fn default_frame_rate() -> u32 {
    60
}

fn default_click_settle() -> u64 {
    500
}
