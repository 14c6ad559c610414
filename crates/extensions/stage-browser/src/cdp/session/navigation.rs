//! Navigation for CDP page session.

use std::time::{Duration, Instant};

use serde_json::json;
use tracing::debug;

use crate::cdp::error::CdpError;

use super::core::PageSession;

const LOAD_TIMEOUT: Duration = Duration::from_secs(30);
const LOAD_POLL: Duration = Duration::from_millis(100);

impl PageSession {
    /// Navigate to URL and wait until the document is usable.
    pub async fn navigate(&self, url: &str) -> Result<String, CdpError> {
        let result = self
            .call("Page.navigate", Some(json!({"url": url})))
            .await?;

        if let Some(error) = result.get("errorText") {
            return Err(CdpError::NavigationFailed(format!(
                "{}: {}",
                url,
                error.as_str().unwrap_or("Unknown error")
            )));
        }

        let frame_id = result["frameId"].as_str().unwrap_or("main").to_string();

        self.wait_for_load().await?;

        debug!("Navigated to {}", url);
        Ok(frame_id)
    }

    /// Poll `document.readyState` until the page has loaded.
    pub async fn wait_for_load(&self) -> Result<(), CdpError> {
        let start = Instant::now();

        loop {
            let result = self.evaluate("document.readyState").await?;

            if result.as_str() == Some("complete") {
                return Ok(());
            }

            if start.elapsed() > LOAD_TIMEOUT {
                return Err(CdpError::Timeout("Page load timeout".to_string()));
            }

            tokio::time::sleep(LOAD_POLL).await;
        }
    }
}
