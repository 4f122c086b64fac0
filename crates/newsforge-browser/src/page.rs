//! Page-scoped session abstraction consumed by the fingerprinting core.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::cdp::ScreenshotFormat;
use crate::manager::BrowserError;

/// Navigation completion condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WaitUntil {
    /// `DOMContentLoaded` fired.
    DomContentLoaded,
    /// The `load` event fired.
    Load,
    /// No network activity for 500 ms after load.
    #[default]
    NetworkIdle,
}

/// Options for [`BrowserSession::navigate`].
#[derive(Debug, Clone, Copy)]
pub struct NavigateOptions {
    pub wait_until: WaitUntil,
    pub timeout: Duration,
}

impl Default for NavigateOptions {
    fn default() -> Self {
        Self {
            wait_until: WaitUntil::NetworkIdle,
            timeout: Duration::from_millis(30_000),
        }
    }
}

/// Options for [`BrowserSession::screenshot`].
#[derive(Debug, Clone, Copy)]
pub struct ScreenshotOptions {
    pub format: ScreenshotFormat,
    pub full_page: bool,
}

impl Default for ScreenshotOptions {
    fn default() -> Self {
        Self {
            format: ScreenshotFormat::Png,
            full_page: false,
        }
    }
}

/// An isolated, page-scoped browser session.
///
/// `close` must be safe to call more than once and after any earlier failure.
#[async_trait]
pub trait BrowserSession: Send + Sync {
    /// Navigate to `url`, failing with [`BrowserError::Timeout`] when
    /// `options.wait_until` is not reached within `options.timeout`.
    async fn navigate(&self, url: &str, options: NavigateOptions) -> Result<(), BrowserError>;

    /// Evaluate a JavaScript expression and return its JSON value.
    async fn evaluate(&self, script: &str) -> Result<Value, BrowserError>;

    /// Capture the page as encoded image bytes.
    async fn screenshot(&self, options: ScreenshotOptions) -> Result<Vec<u8>, BrowserError>;

    /// Release the page and everything scoped to it.
    async fn close(&self) -> Result<(), BrowserError>;
}

/// Source of fresh [`BrowserSession`]s.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Open a new isolated page session.
    async fn acquire_session(&self) -> Result<Box<dyn BrowserSession>, BrowserError>;
}
