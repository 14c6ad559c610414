//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;

mod schema_live;
mod schema_media;

pub use schema_live::*;
pub use schema_media::*;

/// Shared default helper used by submodules.
pub(crate) fn default_true() -> bool {
    true
}

/// Root configuration.
///
/// JSON files may use the camelCase spellings (`isMobile`, `audioOffset`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Page to record. Required.
    #[serde(default)]
    pub url: Option<String>,

    /// Emulate a phone (iPhone 12 metrics, touch, mobile user agent).
    #[serde(default, alias = "isMobile")]
    pub is_mobile: bool,

    /// Capture dimensions; defaults to the device viewport.
    #[serde(default)]
    pub viewport: Option<ViewportConfig>,

    /// Narration language.
    #[serde(default = "default_lang")]
    pub lang: String,

    /// Seconds added to every anchor before wall-clock alignment.
    #[serde(default, alias = "audioOffset")]
    pub audio_offset: f64,

    /// Declarative timeline file.
    #[serde(default = "default_scenario")]
    pub scenario: PathBuf,

    /// Where recordings and intermediates are written.
    #[serde(default = "default_output_dir", alias = "outputDir")]
    pub output_dir: PathBuf,

    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub voice: VoiceConfig,

    #[serde(default)]
    pub media: MediaConfig,

    #[serde(default)]
    pub live: LiveConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: None,
            is_mobile: false,
            viewport: None,
            lang: default_lang(),
            audio_offset: 0.0,
            scenario: default_scenario(),
            output_dir: default_output_dir(),
            browser: BrowserConfig::default(),
            voice: VoiceConfig::default(),
            media: MediaConfig::default(),
            live: LiveConfig::default(),
        }
    }
}

impl Config {
    /// The navigation target; missing is a configuration error.
    pub fn target_url(&self) -> Result<&str, ConfigError> {
        match self.url.as_deref() {
            Some(url) if !url.trim().is_empty() => Ok(url),
            _ => Err(ConfigError::MissingField("url".to_string())),
        }
    }

    /// Capture viewport after applying the device default.
    pub fn effective_viewport(&self) -> ViewportConfig {
        self.viewport.unwrap_or(if self.is_mobile {
            ViewportConfig::MOBILE
        } else {
            ViewportConfig::DESKTOP
        })
    }

    /// Voice passed to the synthesis backend.
    pub fn narration_voice(&self) -> &str {
        self.voice.voice.as_deref().unwrap_or(&self.lang)
    }
}

fn default_lang() -> String {
    "en".to_string()
}

fn default_scenario() -> PathBuf {
    PathBuf::from("scenario.json")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("recordings")
}

/// Capture viewport in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportConfig {
    pub width: u32,
    pub height: u32,
}

impl ViewportConfig {
    /// iPhone 12 viewport.
    pub const MOBILE: ViewportConfig = ViewportConfig {
        width: 390,
        height: 844,
    };

    pub const DESKTOP: ViewportConfig = ViewportConfig {
        width: 1280,
        height: 720,
    };
}

/// Browser launch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    #[serde(default = "default_debug_port")]
    pub debug_port: u16,

    #[serde(default)]
    pub headless: bool,

    /// Profile directory for persistent login state.
    #[serde(default)]
    pub profile_dir: Option<PathBuf>,

    /// Explicit browser executable; auto-detected when absent.
    #[serde(default)]
    pub chrome_path: Option<PathBuf>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            debug_port: default_debug_port(),
            headless: false,
            profile_dir: None,
            chrome_path: None,
        }
    }
}

fn default_debug_port() -> u16 {
    9222
}

/// Narration synthesis backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceConfig {
    /// `google` or `command`.
    #[serde(default = "default_voice_backend")]
    pub backend: String,

    /// Voice override; the top-level `lang` is used when absent.
    #[serde(default)]
    pub voice: Option<String>,

    /// Google TTS host.
    #[serde(default = "default_voice_host")]
    pub host: String,

    #[serde(default)]
    pub slow: bool,

    /// Argument template for the `command` backend.
    /// Placeholders: `{text}`, `{voice}`, `{output}`.
    #[serde(default)]
    pub command: Vec<String>,

    #[serde(default = "default_voice_timeout")]
    pub timeout_secs: u64,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            backend: default_voice_backend(),
            voice: None,
            host: default_voice_host(),
            slow: false,
            command: Vec::new(),
            timeout_secs: default_voice_timeout(),
        }
    }
}

fn default_voice_backend() -> String {
    "google".to_string()
}

fn default_voice_host() -> String {
    "https://translate.google.com".to_string()
}

fn default_voice_timeout() -> u64 {
    30
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
