use std::path::PathBuf;

use director_protocols::MixInput;

use super::*;
use crate::test_runner::FakeRunner;

#[test]
fn test_parse_duration() {
    assert_eq!(parse_duration("3.456000\n"), Some(3.456));
    assert_eq!(parse_duration("N/A"), None);
    assert_eq!(parse_duration(""), None);
    assert_eq!(parse_duration("-1"), None);
}

#[tokio::test]
async fn test_probe_uses_ffprobe() {
    let runner = Arc::new(FakeRunner::replying("2.5\n"));
    let mixer = FfmpegMixer::with_runner("ffmpeg", "/opt/ffprobe", runner.clone());

    let duration = mixer.measure_duration(Path::new("/w/track_0.mp3")).await.unwrap();

    assert_eq!(duration, 2.5);
    let calls = runner.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "/opt/ffprobe");
    assert_eq!(calls[0].1.last().unwrap(), "/w/track_0.mp3");
}

#[tokio::test]
async fn test_measure_unparseable_output() {
    let runner = Arc::new(FakeRunner::replying("garbage"));
    let mixer = FfmpegMixer::with_runner("ffmpeg", "ffprobe", runner);

    let err = mixer.measure_duration(Path::new("clip.mp3")).await.unwrap_err();
    assert!(matches!(err, MediaError::UnknownDuration(ref p) if p == "clip.mp3"));
}

#[tokio::test]
async fn test_mix_runs_ffmpeg_with_plan() {
    let runner = Arc::new(FakeRunner::replying(""));
    let mixer = FfmpegMixer::with_runner("ffmpeg", "ffprobe", runner.clone());
    let plan = MixPlan {
        length: 14.0,
        inputs: vec![MixInput {
            path: PathBuf::from("/w/track_0.mp3"),
            delay_ms: 1200,
        }],
    };

    mixer.mix(&plan, Path::new("/w/master.mp3")).await.unwrap();

    let calls = runner.calls();
    assert_eq!(calls[0].0, "ffmpeg");
    assert!(calls[0].1.iter().any(|a| a.contains("adelay=1200|1200")));
    assert_eq!(calls[0].1.last().unwrap(), "/w/master.mp3");
}

#[tokio::test]
async fn test_mix_failure_propagates() {
    let runner = Arc::new(FakeRunner::failing("Invalid data found"));
    let mixer = FfmpegMixer::with_runner("ffmpeg", "ffprobe", runner);

    let err = mixer
        .mix(&MixPlan::silent(5.0), Path::new("/w/master.mp3"))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Invalid data found"));
}
