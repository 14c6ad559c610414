use std::time::Duration;

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

fn synthesizer(server: &MockServer) -> GoogleSynthesizer {
    GoogleSynthesizer::new(server.uri(), false, Duration::from_secs(5)).unwrap()
}

#[test]
fn test_synthesizer_id() {
    let synth = GoogleSynthesizer::new("https://translate.google.com", false, Duration::from_secs(5)).unwrap();
    assert_eq!(synth.id(), "google");
    assert_eq!(synth.extension(), "mp3");
}

#[tokio::test]
async fn test_synthesize_writes_audio() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/translate_tts"))
        .and(query_param("tl", "sk"))
        .and(query_param("q", "Čaute manažéri!"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ID3-audio".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("track_0.mp3");
    synthesizer(&server)
        .synthesize(&SynthesisRequest::new("Čaute manažéri!", "sk"), &output)
        .await
        .unwrap();

    assert_eq!(std::fs::read(&output).unwrap(), b"ID3-audio");
}

#[tokio::test]
async fn test_long_text_is_chunked_and_concatenated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/translate_tts"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ab".to_vec()))
        .expect(2)
        .mount(&server)
        .await;

    let text = "narration ".repeat(30);
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("long.mp3");
    synthesizer(&server)
        .synthesize(&SynthesisRequest::new(text, "en"), &output)
        .await
        .unwrap();

    assert_eq!(std::fs::read(&output).unwrap(), b"abab");
}

#[tokio::test]
async fn test_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).set_body_string("Too Many Requests"))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("x.mp3");
    let err = synthesizer(&server)
        .synthesize(&SynthesisRequest::new("Hello", "en"), &output)
        .await
        .unwrap_err();

    assert!(matches!(err, SynthesisError::Status { status: 429, .. }));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_empty_body_is_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let err = synthesizer(&server)
        .synthesize(&SynthesisRequest::new("Hello", "en"), &dir.path().join("x.mp3"))
        .await
        .unwrap_err();

    assert!(matches!(err, SynthesisError::EmptyAudio(ref t) if t == "Hello"));
}

#[tokio::test]
async fn test_blank_text_is_rejected_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"x".to_vec()))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let err = synthesizer(&server)
        .synthesize(&SynthesisRequest::new("  ", "en"), &dir.path().join("x.mp3"))
        .await
        .unwrap_err();

    assert!(matches!(err, SynthesisError::EmptyAudio(_)));
}
