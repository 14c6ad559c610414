//! Chrome DevTools Protocol (CDP) client.
//!
//! A small CDP client over a single browser WebSocket. Page sessions are
//! attached in flat mode and share the connection.
//!
//! ```rust,ignore
//! let client = CdpClient::connect("http://localhost:9222").await?;
//! let page = client.new_page().await?;
//! page.navigate("https://example.com").await?;
//! ```

mod client;
mod error;
mod protocol;
mod session;

pub use client::CdpClient;
pub use error::CdpError;
pub use protocol::*;
pub use session::{PageSession, MOBILE_USER_AGENT};
