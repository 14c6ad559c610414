//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::Config;

/// Synthesis backends the binary knows how to build.
pub const VOICE_BACKENDS: [&str; 2] = ["google", "command"];

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Turn the first error into a `ConfigError`, if any.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(err) => Err(ConfigError::InvalidValue {
                field: err.path,
                message: err.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::default();

        Self::validate_target(config, &mut result);
        Self::validate_timing(config, &mut result);
        Self::validate_voice(config, &mut result);
        Self::validate_media(config, &mut result);

        Ok(result)
    }

    fn validate_target(config: &Config, result: &mut ValidationResult) {
        match config.target_url() {
            Err(_) => result.add_error(ValidationError::new("url", "url is required")),
            Ok(url) => {
                let known = ["http://", "https://", "file://"];
                if !known.iter().any(|scheme| url.starts_with(scheme)) {
                    result.add_error(ValidationError::new(
                        "url",
                        "url must start with http://, https:// or file://",
                    ));
                }
            }
        }

        if let Some(viewport) = config.viewport {
            if viewport.width == 0 || viewport.height == 0 {
                result.add_error(ValidationError::new(
                    "viewport",
                    "viewport dimensions must be greater than 0",
                ));
            }
        }

        if config.browser.debug_port == 0 {
            result.add_error(ValidationError::new(
                "browser.debug_port",
                "Port cannot be 0",
            ));
        }
    }

    fn validate_timing(config: &Config, result: &mut ValidationResult) {
        if !config.audio_offset.is_finite() {
            result.add_error(ValidationError::new(
                "audio_offset",
                "audio_offset must be a finite number",
            ));
        } else if config.audio_offset.abs() > 5.0 {
            result.add_warning(ValidationWarning::new(
                "audio_offset",
                "audio_offset is larger than 5 seconds, narration may look out of sync",
            ));
        }

        if config.live.frame_rate == 0 {
            result.add_error(ValidationError::new(
                "live.frame_rate",
                "frame_rate must be greater than 0",
            ));
        }

        if config.live.visibility_timeout_ms == 0 {
            result.add_warning(ValidationWarning::new(
                "live.visibility_timeout_ms",
                "visibility timeout is 0, clicks will always use the direct fallback",
            ));
        }
    }

    fn validate_voice(config: &Config, result: &mut ValidationResult) {
        let voice = &config.voice;
        if !VOICE_BACKENDS.contains(&voice.backend.as_str()) {
            result.add_error(ValidationError::new(
                "voice.backend",
                format!(
                    "Unknown voice backend '{}', valid values: {:?}",
                    voice.backend, VOICE_BACKENDS
                ),
            ));
            return;
        }

        if voice.backend == "google"
            && !voice.host.starts_with("http://")
            && !voice.host.starts_with("https://")
        {
            result.add_error(ValidationError::new(
                "voice.host",
                "host must start with http:// or https://",
            ));
        }

        if voice.backend == "command" {
            if voice.command.is_empty() {
                result.add_error(ValidationError::new(
                    "voice.command",
                    "command backend requires a command template",
                ));
            } else if !voice.command.iter().any(|arg| arg.contains("{output}")) {
                result.add_error(ValidationError::new(
                    "voice.command",
                    "command template must contain an {output} placeholder",
                ));
            } else if !voice.command.iter().any(|arg| arg.contains("{text}")) {
                result.add_warning(ValidationWarning::new(
                    "voice.command",
                    "command template has no {text} placeholder, every cue will sound the same",
                ));
            }
        }
    }

    fn validate_media(config: &Config, result: &mut ValidationResult) {
        let media = &config.media;
        if media.fps == 0 {
            result.add_error(ValidationError::new(
                "media.fps",
                "fps must be greater than 0",
            ));
        }

        if media.width == 0 || media.height == 0 {
            result.add_error(ValidationError::new(
                "media.width",
                "output dimensions must be greater than 0",
            ));
        }

        if media.crf > 51 {
            result.add_error(ValidationError::new(
                "media.crf",
                "crf must be between 0 and 51",
            ));
        }

        if !media.master_margin_secs.is_finite() || media.master_margin_secs < 0.0 {
            result.add_error(ValidationError::new(
                "media.master_margin_secs",
                "master_margin_secs must be a non-negative number",
            ));
        }

        if media.player.is_empty() {
            result.add_warning(ValidationWarning::new(
                "media.player",
                "no audio player configured, narration will not be heard during recording",
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
