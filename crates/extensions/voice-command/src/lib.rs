//! Command-line text-to-speech synthesizer for the Director.
//!
//! Runs any engine that can write an audio file from arguments, for example
//! `edge-tts --voice {voice} --text {text} --write-media {output}`.

mod synthesizer;

pub use synthesizer::{expand_template, CommandSynthesizer};
