use std::time::{Duration, UNIX_EPOCH};

use super::*;

fn frame(name: &str, timestamp: f64) -> CapturedFrame {
    CapturedFrame {
        path: PathBuf::from(format!("/tmp/capture/{}", name)),
        timestamp,
    }
}

#[test]
fn test_concat_manifest_durations() {
    let frames = vec![
        frame("frame_000000.jpg", 100.0),
        frame("frame_000001.jpg", 100.5),
        frame("frame_000002.jpg", 101.25),
    ];
    let manifest = concat_manifest(&frames, 102.0);
    let expected = "ffconcat version 1.0\n\
        file '/tmp/capture/frame_000000.jpg'\n\
        duration 0.500000\n\
        file '/tmp/capture/frame_000001.jpg'\n\
        duration 0.750000\n\
        file '/tmp/capture/frame_000002.jpg'\n\
        duration 0.750000\n\
        file '/tmp/capture/frame_000002.jpg'\n";
    assert_eq!(manifest, expected);
}

#[test]
fn test_concat_manifest_empty() {
    assert_eq!(concat_manifest(&[], 10.0), "ffconcat version 1.0\n");
}

#[test]
fn test_concat_manifest_escapes_quotes() {
    let frames = vec![frame("it's.jpg", 1.0)];
    let manifest = concat_manifest(&frames, 2.0);
    assert!(manifest.contains(r"file '/tmp/capture/it'\''s.jpg'"));
}

#[test]
fn test_concat_manifest_clamps_out_of_order_timestamps() {
    let frames = vec![frame("a.jpg", 5.0), frame("b.jpg", 4.0)];
    let manifest = concat_manifest(&frames, 4.0);
    assert!(manifest.contains("duration 0.001000"));
}

#[test]
fn test_lead_in() {
    assert_eq!(lead_in(1002.5, 1000.0), 2.5);
    assert_eq!(lead_in(999.0, 1000.0), 0.0);
}

#[test]
fn test_capture_lead_in_from_wall_zero() {
    let capture = Capture {
        frames: vec![frame("a.jpg", 1_000.0)],
        stopped_at: 1_040.0,
    };
    let wall_zero = UNIX_EPOCH + Duration::from_millis(1_003_250);
    assert!((capture.lead_in(wall_zero) - 3.25).abs() < 1e-9);
}

#[test]
fn test_empty_capture_has_no_lead_in() {
    let capture = Capture {
        frames: Vec::new(),
        stopped_at: 0.0,
    };
    assert!(capture.is_empty());
    assert_eq!(capture.lead_in(SystemTime::now()), 0.0);
}

#[tokio::test]
async fn test_write_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let capture = Capture {
        frames: vec![frame("a.jpg", 1.0)],
        stopped_at: 3.0,
    };
    let path = capture.write_manifest(dir.path()).await.unwrap();
    assert_eq!(path.file_name().unwrap(), "frames.ffconcat");
    let content = std::fs::read_to_string(path).unwrap();
    assert!(content.contains("duration 2.000000"));
}
