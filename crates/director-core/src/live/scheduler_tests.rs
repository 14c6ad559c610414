use super::*;
use crate::live::test_stage::{Failure, FakeStage};
use crate::timeline::Timeline;
use async_trait::async_trait;
use director_protocols::MediaError;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

struct FakePlayback {
    started: AtomicUsize,
    stopped: Arc<AtomicBool>,
    fail: bool,
}

impl FakePlayback {
    fn new(fail: bool) -> Self {
        Self {
            started: AtomicUsize::new(0),
            stopped: Arc::new(AtomicBool::new(false)),
            fail,
        }
    }
}

struct FakeHandle {
    stopped: Arc<AtomicBool>,
}

impl PlaybackHandle for FakeHandle {
    fn stop(&mut self) {
        self.stopped.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl AudioPlayback for FakePlayback {
    async fn start(&self, _path: &Path) -> Result<Box<dyn PlaybackHandle>, MediaError> {
        if self.fail {
            return Err(MediaError::Spawn {
                tool: "ffplay".to_string(),
                message: "not installed".to_string(),
            });
        }
        self.started.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeHandle {
            stopped: self.stopped.clone(),
        }))
    }
}

struct Failing;

#[async_trait]
impl Scenario for Failing {
    fn len(&self) -> usize {
        1
    }

    async fn run(&self, actions: &mut dyn ActionAdapter) -> Result<(), ScheduleError> {
        actions.at(1.0).await?;
        Err(ScheduleError::Scenario("boom".to_string()))
    }
}

fn timeline(json: &str) -> Timeline {
    Timeline::parse(json, Path::new("inline.json")).unwrap()
}

fn scheduler(stage: &Arc<FakeStage>) -> LiveScheduler {
    LiveScheduler::new(stage.clone(), LiveOptions::default())
}

#[tokio::test(start_paused = true)]
async fn test_run_holds_until_inferred_duration() {
    let stage = Arc::new(FakeStage::new());
    let mut scheduler = scheduler(&stage);
    assert_eq!(scheduler.phase(), RunPhase::Idle);

    let scenario = timeline(r#"[{"at": 0, "say": "A", "duration": 1000}]"#);
    let report = scheduler
        .run(&scenario, InferredDuration::from_max_time(1.0))
        .await
        .unwrap();

    assert_eq!(scheduler.phase(), RunPhase::Finished);
    assert_eq!(report.elapsed, Duration::from_secs(3));
    assert_eq!(report.duration.secs(), 3);
    assert!(!report.narrated);
    assert_eq!(stage.calls(), vec!["clock 3", "show A", "hide"]);
}

#[tokio::test(start_paused = true)]
async fn test_run_cannot_restart() {
    let stage = Arc::new(FakeStage::new());
    let mut scheduler = scheduler(&stage);
    let scenario = Timeline::default();

    scheduler
        .run(&scenario, InferredDuration::from_max_time(0.0))
        .await
        .unwrap();
    let err = scheduler
        .run(&scenario, InferredDuration::from_max_time(0.0))
        .await
        .unwrap_err();
    assert!(matches!(err, ScheduleError::AlreadyStarted));
}

#[tokio::test(start_paused = true)]
async fn test_playback_starts_at_zero_and_stops_at_end() {
    let stage = Arc::new(FakeStage::new());
    let player = Arc::new(FakePlayback::new(false));
    let mut scheduler =
        scheduler(&stage).with_narration(player.clone(), PathBuf::from("master.mp3"));

    let report = scheduler
        .run(&Timeline::default(), InferredDuration::from_max_time(0.0))
        .await
        .unwrap();

    assert!(report.narrated);
    assert_eq!(player.started.load(Ordering::SeqCst), 1);
    assert!(player.stopped.load(Ordering::SeqCst));
}

#[tokio::test(start_paused = true)]
async fn test_playback_failure_does_not_block_recording() {
    let stage = Arc::new(FakeStage::new());
    let player = Arc::new(FakePlayback::new(true));
    let mut scheduler =
        scheduler(&stage).with_narration(player.clone(), PathBuf::from("master.mp3"));

    let report = scheduler
        .run(&Timeline::default(), InferredDuration::from_max_time(0.0))
        .await
        .unwrap();

    assert!(!report.narrated);
    assert_eq!(scheduler.phase(), RunPhase::Finished);
}

#[tokio::test(start_paused = true)]
async fn test_late_anchors_are_reported() {
    let stage = Arc::new(FakeStage::new());
    let mut scheduler = scheduler(&stage);
    let scenario = timeline(r#"[{"at": 0, "wait": 3000}, {"at": 1}, {"at": 4}]"#);

    let report = scheduler
        .run(&scenario, InferredDuration::from_max_time(4.0))
        .await
        .unwrap();

    assert_eq!(report.late_anchors, 1);
    assert_eq!(report.max_lateness, Duration::from_secs(2));
    assert_eq!(report.elapsed, Duration::from_secs(6));
}

#[tokio::test(start_paused = true)]
async fn test_fence_does_not_extend_an_overrunning_script() {
    let stage = Arc::new(FakeStage::new());
    let mut scheduler = scheduler(&stage);
    let scenario = timeline(r#"[{"wait": 5000}]"#);

    // Deliberately short duration: the fence is late and returns at once.
    let report = scheduler
        .run(&scenario, InferredDuration::from_max_time(0.0))
        .await
        .unwrap();
    assert_eq!(report.elapsed, Duration::from_secs(5));
}

#[tokio::test(start_paused = true)]
async fn test_scenario_failure_stops_playback_and_stays_running() {
    let stage = Arc::new(FakeStage::new());
    let player = Arc::new(FakePlayback::new(false));
    let mut scheduler =
        scheduler(&stage).with_narration(player.clone(), PathBuf::from("master.mp3"));

    let err = scheduler
        .run(&Failing, InferredDuration::from_max_time(10.0))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("boom"));
    assert_eq!(scheduler.phase(), RunPhase::Running);
    assert!(player.stopped.load(Ordering::SeqCst));
}

#[tokio::test(start_paused = true)]
async fn test_clock_overlay_failure_is_tolerated() {
    let stage = Arc::new(FakeStage::new());
    *stage.clock_failure.lock() = Failure::Script;
    let mut scheduler = scheduler(&stage);

    assert!(scheduler
        .run(&Timeline::default(), InferredDuration::from_max_time(0.0))
        .await
        .is_ok());
}

#[tokio::test(start_paused = true)]
async fn test_host_loss_at_start_is_fatal() {
    let stage = Arc::new(FakeStage::new());
    *stage.clock_failure.lock() = Failure::Host;
    let mut scheduler = scheduler(&stage);

    let err = scheduler
        .run(&Timeline::default(), InferredDuration::from_max_time(0.0))
        .await
        .unwrap_err();
    assert!(matches!(err, ScheduleError::Stage(_)));
}
