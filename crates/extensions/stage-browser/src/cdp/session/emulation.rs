//! Device emulation for CDP page session.

use serde_json::json;
use tracing::debug;

use crate::cdp::error::CdpError;
use crate::cdp::protocol::DeviceMetrics;

use super::core::PageSession;

/// iPhone Safari user agent used for mobile emulation.
pub const MOBILE_USER_AGENT: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) \
AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1";

impl PageSession {
    /// Override the viewport metrics.
    pub async fn set_device_metrics(&self, metrics: &DeviceMetrics) -> Result<(), CdpError> {
        self.call(
            "Emulation.setDeviceMetricsOverride",
            Some(serde_json::to_value(metrics)?),
        )
        .await?;
        debug!(
            width = metrics.width,
            height = metrics.height,
            mobile = metrics.mobile,
            "Device metrics applied"
        );
        Ok(())
    }

    pub async fn set_touch_emulation(&self, enabled: bool) -> Result<(), CdpError> {
        self.call(
            "Emulation.setTouchEmulationEnabled",
            Some(json!({ "enabled": enabled, "maxTouchPoints": 5 })),
        )
        .await?;
        Ok(())
    }

    pub async fn set_user_agent(&self, user_agent: &str) -> Result<(), CdpError> {
        self.call(
            "Emulation.setUserAgentOverride",
            Some(json!({ "userAgent": user_agent })),
        )
        .await?;
        Ok(())
    }
}
