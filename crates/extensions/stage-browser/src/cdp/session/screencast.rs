//! Screencast control for CDP page session.

use serde_json::json;

use crate::cdp::error::CdpError;
use crate::cdp::protocol::ScreencastFormat;

use super::core::PageSession;

impl PageSession {
    /// Start streaming `Page.screencastFrame` events.
    pub async fn start_screencast(
        &self,
        format: ScreencastFormat,
        quality: u8,
        max_width: u32,
        max_height: u32,
    ) -> Result<(), CdpError> {
        self.call(
            "Page.startScreencast",
            Some(json!({
                "format": format,
                "quality": quality,
                "maxWidth": max_width,
                "maxHeight": max_height,
                "everyNthFrame": 1,
            })),
        )
        .await?;
        Ok(())
    }

    /// Acknowledge a frame; the browser stops sending until it is acked.
    pub async fn ack_screencast_frame(&self, frame_session: i64) -> Result<(), CdpError> {
        self.call(
            "Page.screencastFrameAck",
            Some(json!({ "sessionId": frame_session })),
        )
        .await?;
        Ok(())
    }

    pub async fn stop_screencast(&self) -> Result<(), CdpError> {
        self.call("Page.stopScreencast", None).await?;
        Ok(())
    }
}
