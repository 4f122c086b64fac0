//! Chrome DevTools Protocol (CDP) client implementation.
//!
//! Connects to Chrome/Chromium via WebSocket and speaks the CDP JSON-RPC
//! protocol over a single browser-level connection, multiplexing page
//! sessions with flattened `sessionId`s.
//!
//! ```rust,ignore
//! let client = CdpClient::connect("http://localhost:9222").await?;
//! let context = client.create_browser_context().await?;
//! let page = client.new_page(&context).await?;
//! page.navigate("https://example.com", WaitUntil::NetworkIdle, timeout).await?;
//! ```

mod client;
mod error;
mod protocol;
mod session;

pub use client::CdpClient;
pub use error::CdpError;
pub use protocol::*;
pub use session::PageSession;
