use super::*;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert!(config.url.is_none());
    assert!(!config.is_mobile);
    assert_eq!(config.lang, "en");
    assert_eq!(config.audio_offset, 0.0);
    assert_eq!(config.scenario, PathBuf::from("scenario.json"));
    assert_eq!(config.output_dir, PathBuf::from("recordings"));
}

#[test]
fn test_target_url_missing() {
    let config = Config::default();
    let err = config.target_url().unwrap_err();
    assert!(matches!(err, ConfigError::MissingField(ref f) if f == "url"));
}

#[test]
fn test_target_url_blank_is_missing() {
    let config = Config {
        url: Some("   ".to_string()),
        ..Config::default()
    };
    assert!(config.target_url().is_err());
}

#[test]
fn test_target_url_present() {
    let config = Config {
        url: Some("https://example.com".to_string()),
        ..Config::default()
    };
    assert_eq!(config.target_url().unwrap(), "https://example.com");
}

#[test]
fn test_effective_viewport_defaults() {
    let mut config = Config::default();
    assert_eq!(config.effective_viewport(), ViewportConfig::DESKTOP);

    config.is_mobile = true;
    assert_eq!(config.effective_viewport(), ViewportConfig::MOBILE);

    config.viewport = Some(ViewportConfig {
        width: 430,
        height: 932,
    });
    assert_eq!(config.effective_viewport().width, 430);
}

#[test]
fn test_narration_voice_falls_back_to_lang() {
    let mut config = Config {
        lang: "sk".to_string(),
        ..Config::default()
    };
    assert_eq!(config.narration_voice(), "sk");

    config.voice.voice = Some("sk-SK-ViktoriaNeural".to_string());
    assert_eq!(config.narration_voice(), "sk-SK-ViktoriaNeural");
}

#[test]
fn test_browser_config_default() {
    let browser = BrowserConfig::default();
    assert_eq!(browser.debug_port, 9222);
    assert!(!browser.headless);
    assert!(browser.profile_dir.is_none());
}

#[test]
fn test_voice_config_default() {
    let voice = VoiceConfig::default();
    assert_eq!(voice.backend, "google");
    assert_eq!(voice.host, "https://translate.google.com");
    assert!(voice.command.is_empty());
    assert_eq!(voice.timeout_secs, 30);
}

#[test]
fn test_media_config_default() {
    let media = MediaConfig::default();
    assert_eq!(media.ffmpeg, "ffmpeg");
    assert_eq!((media.width, media.height), (1080, 1920));
    assert_eq!(media.crf, 18);
    assert_eq!(media.preset, "slow");
    assert_eq!(media.audio_bitrate, "192k");
    assert_eq!(media.player[0], "ffplay");
    assert!(!media.keep_intermediates);
}

#[test]
fn test_live_config_default() {
    let live = LiveConfig::default();
    assert_eq!(live.visibility_timeout_ms, 5000);
    assert_eq!(live.frame_rate, 60);
    assert!(live.prompt);
    assert!(live.progress_overlay);
    assert_eq!(live.click_settle_ms, 500);
}

#[test]
fn test_camel_case_aliases() {
    let json = r#"{"url": "https://fpl.studio", "isMobile": true, "audioOffset": 0.25}"#;
    let config: Config = serde_json::from_str(json).unwrap();
    assert!(config.is_mobile);
    assert_eq!(config.audio_offset, 0.25);
}

#[test]
fn test_config_serialization() {
    let config = Config::default();
    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains("scenario.json"));
    assert!(json.contains("ffmpeg"));
}
