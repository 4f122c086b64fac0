//! Browser session management for newsforge.
//!
//! Drives Chrome/Chromium through the Chrome DevTools Protocol (CDP) so the
//! layout fingerprinting code can read computed styles off a real rendered
//! page. Pure Rust, no Node.js or Playwright runtime.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────┐   WebSocket    ┌──────────────────────────┐
//! │  BrowserManager  │ ◄────────────► │  Chrome (one per process)│
//! │  (lazy, shared)  │      CDP       │  ├─ context A ─ page     │
//! └──────────────────┘                │  └─ context B ─ page     │
//!                                     └──────────────────────────┘
//! ```
//!
//! Every call to [`SessionProvider::acquire_session`] creates a fresh browser
//! context, so cookies, storage and script state never leak between
//! extractions.
//!
//! ## Lazy Initialization
//!
//! Chrome is NOT launched when the manager is built. The first
//! `acquire_session` connects to (or launches) Chrome; concurrent first
//! callers wait on the same initialization instead of racing.

pub mod cdp;
pub mod manager;
mod page;

pub use cdp::{CdpClient, CdpError, PageSession};
pub use manager::{BrowserError, BrowserManager, BrowserManagerConfig};
pub use page::{
    BrowserSession, NavigateOptions, ScreenshotOptions, SessionProvider, WaitUntil,
};
pub use cdp::ScreenshotFormat;
