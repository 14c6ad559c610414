//! Browser connection: one WebSocket shared by every attached page.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot, RwLock};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, trace, warn};

use super::error::CdpError;
use super::protocol::{BrowserVersion, CdpRequest, CdpResponse, PageInfo};
use super::session::PageSession;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type Replies = Arc<Mutex<HashMap<u64, oneshot::Sender<Result<Value, CdpError>>>>>;
type Subscribers = Arc<RwLock<HashMap<String, mpsc::UnboundedSender<CdpResponse>>>>;

/// How long a single command may wait for its response.
const CALL_TIMEOUT: Duration = Duration::from_secs(30);

/// Command channel shared by the client and its page sessions.
#[derive(Clone)]
pub(crate) struct Transport {
    sink: Arc<tokio::sync::Mutex<SplitSink<WsStream, Message>>>,
    replies: Replies,
    next_id: Arc<AtomicU64>,
}

impl Transport {
    /// Send `method`, optionally routed to a page session, and await the reply.
    pub(crate) async fn call(
        &self,
        method: &str,
        params: Option<Value>,
        session_id: Option<&str>,
    ) -> Result<Value, CdpError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let frame = serde_json::to_string(&CdpRequest {
            id,
            method: method.to_string(),
            params,
            session_id: session_id.map(str::to_string),
        })?;
        trace!(id, "-> {}", frame);

        let (tx, rx) = oneshot::channel();
        self.replies.lock().insert(id, tx);

        let sent = self.sink.lock().await.send(Message::Text(frame.into())).await;
        if let Err(e) = sent {
            self.replies.lock().remove(&id);
            return Err(e.into());
        }

        match tokio::time::timeout(CALL_TIMEOUT, rx).await {
            Ok(reply) => reply.unwrap_or(Err(CdpError::SessionClosed)),
            Err(_) => {
                self.replies.lock().remove(&id);
                Err(CdpError::Timeout(format!("{} got no reply", method)))
            }
        }
    }
}

/// Route one inbound frame: replies complete their caller, events go to the
/// subscriber registered for their session.
async fn dispatch(frame: &str, replies: &Replies, subscribers: &Subscribers) {
    let message: CdpResponse = match serde_json::from_str(frame) {
        Ok(message) => message,
        Err(e) => {
            warn!("Unreadable CDP frame: {}", e);
            return;
        }
    };

    if let Some(id) = message.id {
        let Some(tx) = replies.lock().remove(&id) else {
            return;
        };
        let reply = match message.error {
            Some(e) => Err(CdpError::Protocol {
                code: e.code,
                message: e.message,
            }),
            None => Ok(message.result.unwrap_or(Value::Null)),
        };
        let _ = tx.send(reply);
    } else if message.method.is_some() {
        let session = message.session_id.clone().unwrap_or_default();
        if let Some(tx) = subscribers.read().await.get(&session) {
            let _ = tx.send(message);
        }
    }
}

/// Connection to a browser's DevTools endpoint.
pub struct CdpClient {
    http_endpoint: String,
    transport: Transport,
    subscribers: Subscribers,
    reader: tokio::task::JoinHandle<()>,
}

impl CdpClient {
    /// Connect to Chrome at the given endpoint (e.g. `http://localhost:9222`).
    pub async fn connect(endpoint: &str) -> Result<Self, CdpError> {
        let parsed = url::Url::parse(endpoint)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(CdpError::ConnectionFailed(format!(
                "Expected an http(s) debugging endpoint, got {}",
                endpoint
            )));
        }
        let http_endpoint = endpoint.trim_end_matches('/').to_string();

        let unavailable = |e: reqwest::Error| CdpError::ChromeNotAvailable(format!("{}: {}", endpoint, e));
        let version: BrowserVersion = reqwest::get(format!("{}/json/version", http_endpoint))
            .await
            .map_err(unavailable)?
            .json()
            .await
            .map_err(unavailable)?;

        let (stream, _) = tokio_tungstenite::connect_async(&version.web_socket_debugger_url)
            .await
            .map_err(|e| CdpError::ConnectionFailed(format!("WebSocket: {}", e)))?;
        debug!(browser = %version.browser, "Attached to {}", version.web_socket_debugger_url);

        let (sink, source) = stream.split();
        let transport = Transport {
            sink: Arc::new(tokio::sync::Mutex::new(sink)),
            replies: Arc::new(Mutex::new(HashMap::new())),
            next_id: Arc::new(AtomicU64::new(1)),
        };
        let subscribers: Subscribers = Arc::new(RwLock::new(HashMap::new()));
        let reader = tokio::spawn(Self::read_frames(
            source,
            transport.replies.clone(),
            subscribers.clone(),
        ));

        Ok(Self {
            http_endpoint,
            transport,
            subscribers,
            reader,
        })
    }

    async fn read_frames(mut source: SplitStream<WsStream>, replies: Replies, subscribers: Subscribers) {
        while let Some(frame) = source.next().await {
            match frame {
                Ok(Message::Text(text)) => {
                    trace!("<- {}", text);
                    dispatch(&text, &replies, &subscribers).await;
                }
                Ok(Message::Close(_)) => {
                    debug!("Browser closed the DevTools socket");
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    error!("DevTools socket failed: {}", e);
                    break;
                }
            }
        }

        // Dropping the senders fails every outstanding call with SessionClosed.
        replies.lock().clear();
        subscribers.write().await.clear();
    }

    /// Open a blank tab and attach a flat session to it.
    pub async fn new_page(&self) -> Result<PageSession, CdpError> {
        let page: PageInfo = reqwest::Client::new()
            .put(format!("{}/json/new", self.http_endpoint))
            .send()
            .await?
            .json()
            .await?;
        debug!(target_id = %page.id, "Opened tab");

        self.attach(&page.id).await
    }

    async fn attach(&self, target_id: &str) -> Result<PageSession, CdpError> {
        let attached = self
            .transport
            .call(
                "Target.attachToTarget",
                Some(json!({ "targetId": target_id, "flatten": true })),
                None,
            )
            .await?;
        let session_id = attached["sessionId"]
            .as_str()
            .ok_or_else(|| CdpError::InvalidResponse("attachToTarget without sessionId".to_string()))?
            .to_string();

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        self.subscribers.write().await.insert(session_id.clone(), events_tx);

        let session = PageSession::new(
            target_id.to_string(),
            session_id,
            self.transport.clone(),
            events_rx,
        );
        session.enable_domains().await?;
        Ok(session)
    }

    /// Close a tab opened with [`new_page`](Self::new_page).
    pub async fn close_page(&self, target_id: &str) -> Result<(), CdpError> {
        self.transport
            .call("Target.closeTarget", Some(json!({ "targetId": target_id })), None)
            .await?;
        Ok(())
    }
}

impl Drop for CdpClient {
    fn drop(&mut self) {
        self.reader.abort();
    }
}
