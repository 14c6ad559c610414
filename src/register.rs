//! Wiring from configuration to the concrete backends.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use director_config::{Config, MediaConfig, VoiceConfig};
use director_core::LiveOptions;
use director_media_ffmpeg::{CommandPlayback, EncodeSettings, FfmpegMixer, Finisher};
use director_protocols::{AudioMixer, AudioPlayback, SynthesisError, Synthesizer};
use director_stage_browser::{BrowserManagerConfig, DeviceProfile};
use director_voice_command::CommandSynthesizer;
use director_voice_google::GoogleSynthesizer;

/// Build the synthesis backend named by `voice.backend`.
pub(crate) fn synthesizer(voice: &VoiceConfig) -> Result<Arc<dyn Synthesizer>, SynthesisError> {
    let timeout = Duration::from_secs(voice.timeout_secs);
    let synth: Arc<dyn Synthesizer> = match voice.backend.as_str() {
        "google" => Arc::new(GoogleSynthesizer::new(&voice.host, voice.slow, timeout)?),
        "command" => Arc::new(CommandSynthesizer::new(voice.command.clone(), timeout)?),
        other => {
            return Err(SynthesisError::Command(format!(
                "Unknown voice backend: {}",
                other
            )));
        }
    };
    info!(backend = synth.id(), "Registered synthesizer");
    Ok(synth)
}

pub(crate) fn mixer(media: &MediaConfig) -> Arc<dyn AudioMixer> {
    Arc::new(FfmpegMixer::new(&media.ffmpeg, &media.ffprobe))
}

pub(crate) fn player(media: &MediaConfig) -> Arc<dyn AudioPlayback> {
    Arc::new(CommandPlayback::new(media.player.clone()))
}

pub(crate) fn encode_settings(media: &MediaConfig) -> EncodeSettings {
    EncodeSettings {
        width: media.width,
        height: media.height,
        fps: media.fps,
        crf: media.crf,
        preset: media.preset.clone(),
        audio_bitrate: media.audio_bitrate.clone(),
    }
}

pub(crate) fn finisher(media: &MediaConfig) -> Finisher {
    Finisher::new(&media.ffmpeg, encode_settings(media))
}

pub(crate) fn live_options(config: &Config) -> LiveOptions {
    LiveOptions {
        audio_offset: config.audio_offset,
        visibility_timeout: Duration::from_millis(config.live.visibility_timeout_ms),
        frame_rate: config.live.frame_rate,
        click_settle: Duration::from_millis(config.live.click_settle_ms),
        ..LiveOptions::default()
    }
}

pub(crate) fn device_profile(config: &Config) -> DeviceProfile {
    let viewport = config.effective_viewport();
    DeviceProfile {
        width: viewport.width,
        height: viewport.height,
        mobile: config.is_mobile,
    }
}

pub(crate) fn browser_config(config: &Config) -> BrowserManagerConfig {
    let viewport = config.effective_viewport();
    BrowserManagerConfig {
        debug_port: config.browser.debug_port,
        viewport_width: viewport.width,
        viewport_height: viewport.height,
        profile_dir: config.browser.profile_dir.clone(),
        chrome_path: config.browser.chrome_path.clone(),
        headless: config.browser.headless,
    }
}
