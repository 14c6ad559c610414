//! Chrome-backed [`Stage`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tokio::time::Instant;
use tracing::{debug, info};

use director_protocols::{Point, Rect, Stage, StageError, SurfaceMetrics, SurfaceRef};

use crate::cdp::{CdpError, DeviceMetrics, PageSession, MOBILE_USER_AGENT};
use crate::script::{call_expression, page_script};

/// Interval between visibility checks while locating a target.
const LOCATE_POLL: Duration = Duration::from_millis(100);

/// Device the page is rendered as.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceProfile {
    pub width: u32,
    pub height: u32,
    /// Phone emulation: high DPR, touch and a mobile user agent.
    pub mobile: bool,
}

impl DeviceProfile {
    pub fn metrics(&self) -> DeviceMetrics {
        DeviceMetrics {
            width: self.width,
            height: self.height,
            device_scale_factor: if self.mobile { 3.0 } else { 1.0 },
            mobile: self.mobile,
        }
    }
}

/// Stage that drives one Chrome tab through CDP and the in-page helper script.
pub struct BrowserStage {
    session: Arc<PageSession>,
    /// Last position the input pointer was moved to.
    pointer: Mutex<Point>,
    progress_overlay: bool,
}

impl BrowserStage {
    pub fn new(session: Arc<PageSession>) -> Self {
        Self {
            session,
            pointer: Mutex::new(Point::ORIGIN),
            progress_overlay: true,
        }
    }

    /// Leave the timer and progress bar untouched on `start_clock`.
    pub fn without_progress_overlay(mut self) -> Self {
        self.progress_overlay = false;
        self
    }

    pub fn session(&self) -> &Arc<PageSession> {
        &self.session
    }

    /// Apply device emulation, install the helper script and open `url`.
    pub async fn prepare(&self, url: &str, device: DeviceProfile) -> Result<(), CdpError> {
        self.session.set_device_metrics(&device.metrics()).await?;
        if device.mobile {
            self.session.set_touch_emulation(true).await?;
            self.session.set_user_agent(MOBILE_USER_AGENT).await?;
        }

        let script = page_script();
        self.session.add_init_script(&script).await?;
        self.session.navigate(url).await?;
        // Documents that finished loading before the init script was registered.
        self.session.evaluate(&script).await?;
        self.session
            .evaluate(&call_expression("install", &[]))
            .await?;

        info!(url, mobile = device.mobile, "Stage ready");
        Ok(())
    }

    async fn invoke(&self, function: &str, args: &[Value]) -> Result<Value, StageError> {
        let expression = call_expression(function, args);
        Ok(self.session.evaluate(&expression).await?)
    }

    async fn invoke_as<T: DeserializeOwned>(
        &self,
        function: &str,
        args: &[Value],
    ) -> Result<T, StageError> {
        let value = self.invoke(function, args).await?;
        serde_json::from_value(value)
            .map_err(|e| StageError::Script(format!("{} returned unexpected data: {}", function, e)))
    }

    fn surface_index(surface: SurfaceRef) -> i64 {
        match surface {
            SurfaceRef::Element(index) => index as i64,
            SurfaceRef::Document => -1,
        }
    }

    /// Intermediate pointer positions from `from` to `to`, ending exactly at `to`.
    pub(crate) fn pointer_path(from: Point, to: Point, steps: u32) -> Vec<Point> {
        let steps = steps.max(1);
        (1..=steps)
            .map(|i| {
                if i == steps {
                    to
                } else {
                    from.lerp(to, i as f64 / steps as f64)
                }
            })
            .collect()
    }
}

#[async_trait]
impl Stage for BrowserStage {
    async fn start_clock(&self, total: Duration) -> Result<(), StageError> {
        if !self.progress_overlay {
            return Ok(());
        }
        self.invoke("startClock", &[json!(total.as_millis() as u64)])
            .await?;
        Ok(())
    }

    async fn show_subtitle(&self, text: &str) -> Result<(), StageError> {
        self.invoke("showSubtitle", &[json!(text)]).await?;
        Ok(())
    }

    async fn hide_subtitle(&self) -> Result<(), StageError> {
        self.invoke("hideSubtitle", &[]).await?;
        Ok(())
    }

    async fn locate(&self, target: &str, timeout: Duration) -> Result<Rect, StageError> {
        let deadline = Instant::now() + timeout;
        loop {
            let found: Option<Rect> = self.invoke_as("locate", &[json!(target)]).await?;
            if let Some(rect) = found.filter(|r| !r.is_empty()) {
                debug!(target, x = rect.x, y = rect.y, "Target located");
                return Ok(rect);
            }

            if Instant::now() >= deadline {
                return Err(StageError::Timeout(format!(
                    "'{}' not visible after {}ms",
                    target,
                    timeout.as_millis()
                )));
            }

            tokio::time::sleep(LOCATE_POLL).await;
        }
    }

    async fn show_pointer(&self, at: Point) -> Result<(), StageError> {
        self.invoke("showPointer", &[json!(at.x), json!(at.y)])
            .await?;
        Ok(())
    }

    async fn move_pointer(&self, to: Point, steps: u32) -> Result<(), StageError> {
        let from = *self.pointer.lock();
        for point in Self::pointer_path(from, to, steps) {
            self.session.mouse_move(point.x, point.y).await?;
        }
        *self.pointer.lock() = to;
        Ok(())
    }

    async fn press(&self, at: Point, hold: Duration) -> Result<(), StageError> {
        self.session.mouse_down(at.x, at.y).await?;
        tokio::time::sleep(hold).await;
        self.session.mouse_up(at.x, at.y).await?;
        *self.pointer.lock() = at;
        Ok(())
    }

    async fn hide_pointer(&self) -> Result<(), StageError> {
        self.invoke("hidePointer", &[]).await?;
        Ok(())
    }

    async fn activate_direct(&self, target: &str) -> Result<(), StageError> {
        let activated: bool = self.invoke_as("activate", &[json!(target)]).await?;
        if activated {
            Ok(())
        } else {
            Err(StageError::NotFound(target.to_string()))
        }
    }

    async fn scroll_candidates(&self) -> Result<Vec<SurfaceMetrics>, StageError> {
        self.invoke_as("scrollCandidates", &[]).await
    }

    async fn scroll_offset(&self, surface: SurfaceRef) -> Result<Point, StageError> {
        self.invoke_as("getScroll", &[json!(Self::surface_index(surface))])
            .await
    }

    async fn set_scroll_offset(&self, surface: SurfaceRef, to: Point) -> Result<(), StageError> {
        self.invoke(
            "setScroll",
            &[json!(Self::surface_index(surface)), json!(to.x), json!(to.y)],
        )
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_path_ends_at_target() {
        let path = BrowserStage::pointer_path(Point::ORIGIN, Point::new(100.0, 40.0), 4);
        assert_eq!(path.len(), 4);
        assert_eq!(path[0], Point::new(25.0, 10.0));
        assert_eq!(path[3], Point::new(100.0, 40.0));
    }

    #[test]
    fn test_pointer_path_zero_steps_jumps() {
        let path = BrowserStage::pointer_path(Point::new(5.0, 5.0), Point::new(50.0, 60.0), 0);
        assert_eq!(path, vec![Point::new(50.0, 60.0)]);
    }

    #[test]
    fn test_surface_index() {
        assert_eq!(BrowserStage::surface_index(SurfaceRef::Document), -1);
        assert_eq!(BrowserStage::surface_index(SurfaceRef::Element(3)), 3);
    }

    #[test]
    fn test_device_profile_metrics() {
        let phone = DeviceProfile {
            width: 390,
            height: 844,
            mobile: true,
        };
        assert_eq!(phone.metrics().device_scale_factor, 3.0);
        assert!(phone.metrics().mobile);

        let desktop = DeviceProfile {
            width: 1280,
            height: 720,
            mobile: false,
        };
        assert_eq!(desktop.metrics().device_scale_factor, 1.0);
    }
}
