//! Mouse input for CDP page session.

use serde_json::json;

use crate::cdp::error::CdpError;
use crate::cdp::protocol::{MouseButton, MouseEventType};

use super::core::PageSession;

impl PageSession {
    /// Move the mouse to coordinates.
    pub async fn mouse_move(&self, x: f64, y: f64) -> Result<(), CdpError> {
        self.dispatch_mouse(MouseEventType::MouseMoved, MouseButton::None, x, y, 0)
            .await
    }

    /// Press the left button at coordinates.
    pub async fn mouse_down(&self, x: f64, y: f64) -> Result<(), CdpError> {
        self.dispatch_mouse(MouseEventType::MousePressed, MouseButton::Left, x, y, 1)
            .await
    }

    /// Release the left button at coordinates.
    pub async fn mouse_up(&self, x: f64, y: f64) -> Result<(), CdpError> {
        self.dispatch_mouse(MouseEventType::MouseReleased, MouseButton::Left, x, y, 1)
            .await
    }

    async fn dispatch_mouse(
        &self,
        event_type: MouseEventType,
        button: MouseButton,
        x: f64,
        y: f64,
        click_count: u32,
    ) -> Result<(), CdpError> {
        self.call(
            "Input.dispatchMouseEvent",
            Some(json!({
                "type": event_type,
                "x": x,
                "y": y,
                "button": button,
                "clickCount": click_count,
            })),
        )
        .await?;
        Ok(())
    }
}
