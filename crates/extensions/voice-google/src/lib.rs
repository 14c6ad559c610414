//! Google Translate TTS synthesizer for the Director.
//!
//! Uses the unauthenticated `translate_tts` endpoint. Long narration is split
//! into chunks the endpoint accepts and the MP3 responses are concatenated.

mod client;
mod split;
mod synthesizer;

pub use client::{GoogleTtsClient, DEFAULT_HOST};
pub use split::{split_text, MAX_CHUNK_CHARS};
pub use synthesizer::GoogleSynthesizer;
