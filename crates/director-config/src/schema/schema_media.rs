//! External media tool configuration.

use serde::{Deserialize, Serialize};

/// ffmpeg-family tools and output encoding settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    #[serde(default = "default_ffmpeg")]
    pub ffmpeg: String,

    #[serde(default = "default_ffprobe")]
    pub ffprobe: String,

    /// Background audio player command; the audio path is appended.
    #[serde(default = "default_player")]
    pub player: Vec<String>,

    /// Output frame width.
    #[serde(default = "default_width")]
    pub width: u32,

    /// Output frame height.
    #[serde(default = "default_height")]
    pub height: u32,

    /// Frame rate of the raw capture and the final video.
    #[serde(default = "default_fps")]
    pub fps: u32,

    #[serde(default = "default_crf")]
    pub crf: u8,

    #[serde(default = "default_preset")]
    pub preset: String,

    #[serde(default = "default_audio_bitrate")]
    pub audio_bitrate: String,

    /// Extra seconds of master audio past the inferred duration.
    #[serde(default)]
    pub master_margin_secs: f64,

    /// Keep synthesized clips and capture frames after a successful finish.
    #[serde(default)]
    pub keep_intermediates: bool,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            ffmpeg: default_ffmpeg(),
            ffprobe: default_ffprobe(),
            player: default_player(),
            width: default_width(),
            height: default_height(),
            fps: default_fps(),
            crf: default_crf(),
            preset: default_preset(),
            audio_bitrate: default_audio_bitrate(),
            master_margin_secs: 0.0,
            keep_intermediates: false,
        }
    }
}

fn default_ffmpeg() -> String {
    "ffmpeg".to_string()
}

fn default_ffprobe() -> String {
    "ffprobe".to_string()
}

fn default_player() -> Vec<String> {
    ["ffplay", "-nodisp", "-autoexit", "-loglevel", "quiet"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_width() -> u32 {
    1080
}

fn default_height() -> u32 {
    1920
}

fn default_fps() -> u32 {
    30
}

fn default_crf() -> u8 {
    18
}

fn default_preset() -> String {
    "slow".to_string()
}

fn default_audio_bitrate() -> String {
    "192k".to_string()
}
