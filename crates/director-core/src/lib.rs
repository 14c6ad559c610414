//! # Director Core
//!
//! Timing model for scripted screen recordings.
//!
//! ## Components
//!
//! - [`Timeline`] - Declarative scenario loaded from JSON
//! - [`DryRunAdapter`] / [`infer`] - Duration inference without side effects
//! - [`NarrationCompositor`] - Synthesizes cues and mixes them onto one master track
//! - [`LiveScheduler`] / [`LiveAdapter`] - Wall-clock aligned execution against a [`Stage`]
//! - [`EasingScheduler`] - Cosine ease-in-out sampling for scroll animation
//! - [`select_surface`] - Scroll surface resolution policy
//!
//! [`Stage`]: director_protocols::Stage

pub mod easing;
pub mod error;
pub mod inference;
pub mod live;
pub mod narration;
pub mod scroll_surface;
pub mod timeline;

pub use easing::{ease_in_out, EasedFrame, EasingScheduler, Frames};
pub use error::TimelineError;
pub use inference::{infer, DryRunAdapter, Inference, InferredDuration, DURATION_BUFFER_SECS};
pub use live::{
    Alignment, LiveAdapter, LiveOptions, LiveScheduler, RunPhase, RunReport, ScheduleState,
};
pub use narration::{AudioTrack, DroppedCue, MasterAudio, NarrationCompositor, NarrationOutcome};
pub use scroll_surface::{qualifies, select_surface, SCROLL_SLACK_PX};
pub use timeline::{Action, ScrollSpec, Step, Timeline, TimelineWarning};
