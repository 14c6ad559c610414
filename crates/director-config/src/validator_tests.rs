use super::*;
use crate::schema::ViewportConfig;

fn valid_config() -> Config {
    Config {
        url: Some("https://example.com".to_string()),
        ..Config::default()
    }
}

#[test]
fn test_validate_minimal_config() {
    let result = ConfigValidator::validate(&valid_config()).unwrap();
    assert!(result.is_valid());
    assert!(result.warnings.is_empty());
}

#[test]
fn test_validate_missing_url() {
    let result = ConfigValidator::validate(&Config::default()).unwrap();
    assert!(!result.is_valid());
    assert!(result.errors.iter().any(|e| e.path == "url"));
}

#[test]
fn test_validate_bad_url_scheme() {
    let mut config = valid_config();
    config.url = Some("example.com".to_string());
    let result = ConfigValidator::validate(&config).unwrap();
    assert!(!result.is_valid());
}

#[test]
fn test_validate_file_url_allowed() {
    let mut config = valid_config();
    config.url = Some("file:///tmp/demo.html".to_string());
    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.is_valid());
}

#[test]
fn test_validate_zero_viewport() {
    let mut config = valid_config();
    config.viewport = Some(ViewportConfig {
        width: 0,
        height: 844,
    });
    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.errors.iter().any(|e| e.path == "viewport"));
}

#[test]
fn test_validate_non_finite_offset() {
    let mut config = valid_config();
    config.audio_offset = f64::INFINITY;
    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.errors.iter().any(|e| e.path == "audio_offset"));
}

#[test]
fn test_validate_large_offset_warning() {
    let mut config = valid_config();
    config.audio_offset = 8.0;
    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.is_valid());
    assert!(result.warnings.iter().any(|w| w.path == "audio_offset"));
}

#[test]
fn test_validate_unknown_backend() {
    let mut config = valid_config();
    config.voice.backend = "polly".to_string();
    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.errors.iter().any(|e| e.path == "voice.backend"));
}

#[test]
fn test_validate_command_backend_without_template() {
    let mut config = valid_config();
    config.voice.backend = "command".to_string();
    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.errors.iter().any(|e| e.path == "voice.command"));
}

#[test]
fn test_validate_command_backend_without_output() {
    let mut config = valid_config();
    config.voice.backend = "command".to_string();
    config.voice.command = vec!["say".to_string(), "{text}".to_string()];
    let result = ConfigValidator::validate(&config).unwrap();
    assert!(!result.is_valid());
}

#[test]
fn test_validate_command_backend_ok() {
    let mut config = valid_config();
    config.voice.backend = "command".to_string();
    config.voice.command = ["edge-tts", "--text", "{text}", "--write-media", "{output}"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.is_valid());
}

#[test]
fn test_validate_zero_frame_rate() {
    let mut config = valid_config();
    config.live.frame_rate = 0;
    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.errors.iter().any(|e| e.path == "live.frame_rate"));
}

#[test]
fn test_validate_bad_crf() {
    let mut config = valid_config();
    config.media.crf = 60;
    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.errors.iter().any(|e| e.path == "media.crf"));
}

#[test]
fn test_validate_empty_player_warning() {
    let mut config = valid_config();
    config.media.player.clear();
    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.is_valid());
    assert_eq!(result.warnings.len(), 1);
}

#[test]
fn test_into_result_reports_first_error() {
    let result = ConfigValidator::validate(&Config::default()).unwrap();
    let err = result.into_result().unwrap_err();
    assert!(err.to_string().contains("url"));
}

#[test]
fn test_validation_result_default() {
    let result = ValidationResult::default();
    assert!(result.is_valid());
    assert!(result.errors.is_empty());
    assert!(result.warnings.is_empty());
}
