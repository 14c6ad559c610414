//! # Director Protocols
//!
//! Core protocol definitions (traits) for the Director recording pipeline.
//! Contains only interface definitions and plain value types - no implementations.
//!
//! ## Core Traits
//!
//! - [`ActionAdapter`] - The five scenario primitives (`at`, `say`, `click`, `scroll`, `wait`)
//! - [`Scenario`] - Anything that can drive an [`ActionAdapter`]
//! - [`Stage`] - Host-specific visual operations used by the live adapter
//! - [`Synthesizer`] - Text-to-speech backends
//! - [`AudioMixer`] / [`AudioPlayback`] - External audio tooling

pub mod adapter;
pub mod error;
pub mod media;
pub mod stage;
pub mod synthesis;
pub mod types;

pub use adapter::{ActionAdapter, Scenario, DEFAULT_SAY_DURATION_MS};
pub use error::{MediaError, ScheduleError, StageError, SynthesisError};
pub use media::{AudioMixer, AudioPlayback, MixInput, MixPlan, PlaybackHandle};
pub use stage::Stage;
pub use synthesis::{SynthesisRequest, Synthesizer};
pub use types::*;
