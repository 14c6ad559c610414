//! Core session struct and CDP command dispatch.

use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::debug;

use crate::cdp::client::Transport;
use crate::cdp::error::CdpError;
use crate::cdp::protocol::CdpResponse;

/// A session attached to a single page target.
pub struct PageSession {
    pub(super) target_id: String,
    pub(super) session_id: String,
    /// Request plumbing (shared with the client).
    pub(super) transport: Transport,
    /// Event receiver; kept alive until a consumer takes it.
    pub(super) events: Mutex<Option<mpsc::UnboundedReceiver<CdpResponse>>>,
}

impl PageSession {
    pub(crate) fn new(
        target_id: String,
        session_id: String,
        transport: Transport,
        event_rx: mpsc::UnboundedReceiver<CdpResponse>,
    ) -> Self {
        Self {
            target_id,
            session_id,
            transport,
            events: Mutex::new(Some(event_rx)),
        }
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Send a CDP command to this page session.
    pub async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, CdpError> {
        self.transport
            .call(method, params, Some(&self.session_id))
            .await
    }

    /// Take the session's event stream. Only the first caller gets it.
    pub fn take_events(&self) -> Option<mpsc::UnboundedReceiver<CdpResponse>> {
        self.events.lock().take()
    }

    /// Enable the domains the stage relies on.
    pub(crate) async fn enable_domains(&self) -> Result<(), CdpError> {
        self.call("Page.enable", None).await?;
        self.call("Runtime.enable", None).await?;

        debug!("Enabled CDP domains for session {}", self.session_id);
        Ok(())
    }
}
