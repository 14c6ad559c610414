//! The adapter that performs real actions on a [`Stage`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{sleep, sleep_until, Instant};
use tracing::{debug, warn};

use director_protocols::{ActionAdapter, ScheduleError, ScrollTarget, Stage, StageError};

use super::{LiveOptions, ScheduleState};
use crate::easing::EasingScheduler;
use crate::scroll_surface::select_surface;

/// Live implementation of the five primitives.
///
/// Only host loss is fatal. A click or scroll that cannot be resolved is
/// logged and skipped.
pub struct LiveAdapter<'a> {
    stage: Arc<dyn Stage>,
    state: &'a mut ScheduleState,
    options: &'a LiveOptions,
}

impl<'a> LiveAdapter<'a> {
    pub fn new(
        stage: Arc<dyn Stage>,
        state: &'a mut ScheduleState,
        options: &'a LiveOptions,
    ) -> Self {
        Self {
            stage,
            state,
            options,
        }
    }

    pub fn state(&self) -> &ScheduleState {
        self.state
    }

    async fn pointer_click(&self, target: &str) -> Result<(), StageError> {
        let rect = self
            .stage
            .locate(target, self.options.visibility_timeout)
            .await?;
        if rect.is_empty() {
            return Err(StageError::NotFound(target.to_string()));
        }

        let center = rect.center();
        self.stage.show_pointer(center).await?;
        self.stage
            .move_pointer(center, self.options.pointer_steps)
            .await?;
        self.stage.press(center, self.options.press_hold).await?;

        // Activation happened; the halo is cosmetic from here on.
        sleep(self.options.click_settle).await;
        if let Err(e) = self.stage.hide_pointer().await {
            debug!(error = %e, "Failed to hide pointer");
        }
        Ok(())
    }

    async fn animate_scroll(&self, target: ScrollTarget) -> Result<(), StageError> {
        let candidates = self.stage.scroll_candidates().await?;
        let surface = select_surface(&candidates);
        let from = self.stage.scroll_offset(surface).await?;
        let to = target.destination_from(from);

        let easing = EasingScheduler::new(
            from,
            to,
            Duration::from_millis(target.duration_ms),
            self.options.frame_rate,
        );
        debug!(
            ?surface,
            from_y = from.y,
            to_y = to.y,
            frames = easing.frame_count(),
            "Scrolling"
        );

        let started = Instant::now();
        for frame in easing.frames() {
            sleep_until(started + frame.offset).await;
            self.stage.set_scroll_offset(surface, frame.position).await?;
        }
        Ok(())
    }
}

/// Host loss aborts the run; anything narrower is logged and skipped.
pub(super) fn tolerate(result: Result<(), StageError>, action: &str) -> Result<(), ScheduleError> {
    match result {
        Ok(()) => Ok(()),
        Err(StageError::Host(message)) => Err(StageError::Host(message).into()),
        Err(e) => {
            warn!(action, error = %e, "Action skipped");
            Ok(())
        }
    }
}

#[async_trait]
impl ActionAdapter for LiveAdapter<'_> {
    async fn at(&mut self, seconds: f64) -> Result<(), ScheduleError> {
        self.state.align(seconds, self.options.audio_offset).await?;
        Ok(())
    }

    async fn say(&mut self, text: &str, display_ms: u64) -> Result<(), ScheduleError> {
        tolerate(self.stage.show_subtitle(text).await, "say")?;

        let stage = Arc::clone(&self.stage);
        let timer = tokio::spawn(async move {
            sleep(Duration::from_millis(display_ms)).await;
            if let Err(e) = stage.hide_subtitle().await {
                debug!(error = %e, "Failed to hide subtitle");
            }
        });
        self.state.replace_subtitle_timer(timer);
        Ok(())
    }

    async fn click(&mut self, target: &str) -> Result<(), ScheduleError> {
        match self.pointer_click(target).await {
            Ok(()) => debug!(target, "Clicked"),
            Err(e) => {
                warn!(target, error = %e, "Pointer click failed, activating directly");
                if let Err(e) = self.stage.activate_direct(target).await {
                    warn!(target, error = %e, "Direct activation failed");
                }
            }
        }
        Ok(())
    }

    async fn scroll(&mut self, target: ScrollTarget) -> Result<(), ScheduleError> {
        tolerate(self.animate_scroll(target).await, "scroll")
    }

    async fn wait(&mut self, ms: u64) -> Result<(), ScheduleError> {
        sleep(Duration::from_millis(ms)).await;
        Ok(())
    }
}
