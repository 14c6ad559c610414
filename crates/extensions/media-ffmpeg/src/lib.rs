//! ffmpeg-family tooling for the Director.
//!
//! Every invocation is built by a pure argument builder in [`args`] and run
//! through a [`ToolRunner`], so the command lines can be tested without the
//! tools installed.

pub mod args;
mod finish;
mod mixer;
mod playback;
mod runner;

#[cfg(test)]
mod test_runner;

pub use args::{EncodeSettings, FinishJob};
pub use finish::Finisher;
pub use mixer::FfmpegMixer;
pub use playback::{CommandPlayback, ProcessHandle};
pub use runner::{SystemRunner, ToolRunner};
