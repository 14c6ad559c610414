//! In-memory stage for scheduler tests.

use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use director_protocols::{Point, Rect, Stage, StageError, SurfaceMetrics, SurfaceRef};

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Failure {
    None,
    Script,
    Host,
}

impl Failure {
    fn check(self, what: &str) -> Result<(), StageError> {
        match self {
            Failure::None => Ok(()),
            Failure::Script => Err(StageError::Script(what.to_string())),
            Failure::Host => Err(StageError::Host(what.to_string())),
        }
    }
}

pub(crate) struct FakeStage {
    pub calls: Mutex<Vec<String>>,
    pub candidates: Mutex<Vec<SurfaceMetrics>>,
    pub offset: Mutex<Point>,
    pub scrolls: Mutex<Vec<(SurfaceRef, Point)>>,
    /// Targets `locate` reports as missing.
    pub missing: Mutex<Vec<String>>,
    pub direct_failure: Mutex<Failure>,
    pub scroll_failure: Mutex<Failure>,
    pub clock_failure: Mutex<Failure>,
}

impl FakeStage {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            candidates: Mutex::new(Vec::new()),
            offset: Mutex::new(Point::ORIGIN),
            scrolls: Mutex::new(Vec::new()),
            missing: Mutex::new(Vec::new()),
            direct_failure: Mutex::new(Failure::None),
            scroll_failure: Mutex::new(Failure::None),
            clock_failure: Mutex::new(Failure::None),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().push(call);
    }
}

#[async_trait]
impl Stage for FakeStage {
    async fn start_clock(&self, total: Duration) -> Result<(), StageError> {
        self.record(format!("clock {}", total.as_secs()));
        self.clock_failure.lock().check("clock")
    }

    async fn show_subtitle(&self, text: &str) -> Result<(), StageError> {
        self.record(format!("show {}", text));
        Ok(())
    }

    async fn hide_subtitle(&self) -> Result<(), StageError> {
        self.record("hide".to_string());
        Ok(())
    }

    async fn locate(&self, target: &str, timeout: Duration) -> Result<Rect, StageError> {
        self.record(format!("locate {} {}", target, timeout.as_millis()));
        if self.missing.lock().iter().any(|m| m == target) {
            tokio::time::sleep(timeout).await;
            return Err(StageError::Timeout(target.to_string()));
        }
        Ok(Rect {
            x: 100.0,
            y: 200.0,
            width: 80.0,
            height: 40.0,
        })
    }

    async fn show_pointer(&self, at: Point) -> Result<(), StageError> {
        self.record(format!("pointer {},{}", at.x, at.y));
        Ok(())
    }

    async fn move_pointer(&self, to: Point, steps: u32) -> Result<(), StageError> {
        self.record(format!("move {},{} {}", to.x, to.y, steps));
        Ok(())
    }

    async fn press(&self, at: Point, hold: Duration) -> Result<(), StageError> {
        self.record(format!("press {},{} {}", at.x, at.y, hold.as_millis()));
        Ok(())
    }

    async fn hide_pointer(&self) -> Result<(), StageError> {
        self.record("hide_pointer".to_string());
        Ok(())
    }

    async fn activate_direct(&self, target: &str) -> Result<(), StageError> {
        self.record(format!("direct {}", target));
        self.direct_failure.lock().check(target)
    }

    async fn scroll_candidates(&self) -> Result<Vec<SurfaceMetrics>, StageError> {
        self.record("candidates".to_string());
        self.scroll_failure.lock().check("candidates")?;
        Ok(self.candidates.lock().clone())
    }

    async fn scroll_offset(&self, _surface: SurfaceRef) -> Result<Point, StageError> {
        Ok(*self.offset.lock())
    }

    async fn set_scroll_offset(&self, surface: SurfaceRef, to: Point) -> Result<(), StageError> {
        *self.offset.lock() = to;
        self.scrolls.lock().push((surface, to));
        Ok(())
    }
}
