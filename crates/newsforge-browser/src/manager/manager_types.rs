//! Browser manager type definitions and configuration.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::cdp::CdpError;

/// Browser manager and session errors.
#[derive(Debug, Error)]
pub enum BrowserError {
    /// The shared browser instance could not be created.
    #[error("Browser unavailable: {0}")]
    Unavailable(String),

    #[error("Chrome not found. Install Google Chrome/Chromium or set browser.chrome_path.")]
    ChromeNotFound,

    #[error("Failed to launch Chrome: {0}")]
    LaunchFailed(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Script evaluation failed: {0}")]
    Evaluation(String),

    #[error("Screenshot failed: {0}")]
    ScreenshotFailed(String),

    #[error("Session closed")]
    SessionClosed,

    #[error("Session error: {0}")]
    Session(String),
}

impl BrowserError {
    /// Whether this error means no session can be produced at all.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            BrowserError::Unavailable(_) | BrowserError::ChromeNotFound | BrowserError::LaunchFailed(_)
        )
    }
}

impl From<CdpError> for BrowserError {
    fn from(e: CdpError) -> Self {
        match e {
            CdpError::ConnectionFailed(msg) => BrowserError::Unavailable(msg),
            CdpError::ChromeNotAvailable(msg) => BrowserError::Unavailable(msg),
            CdpError::NavigationFailed(msg) => BrowserError::NavigationFailed(msg),
            CdpError::JavaScript(msg) => BrowserError::Evaluation(msg),
            CdpError::Timeout(msg) => BrowserError::Timeout(msg),
            CdpError::SessionClosed => BrowserError::SessionClosed,
            _ => BrowserError::Session(e.to_string()),
        }
    }
}

/// Browser configuration.
#[derive(Debug, Clone)]
pub struct BrowserManagerConfig {
    /// Chrome debugging port.
    pub debug_port: u16,
    /// Viewport width applied to every session.
    pub viewport_width: u32,
    /// Viewport height applied to every session.
    pub viewport_height: u32,
    /// Profile directory for the launched Chrome.
    pub profile_dir: Option<PathBuf>,
    /// Explicit executable; auto-detected when `None`.
    pub chrome_path: Option<PathBuf>,
    /// Whether to run Chrome in headless mode.
    pub headless: bool,
    /// How long a launched Chrome gets to expose its debug endpoint.
    pub launch_timeout: Duration,
}

impl Default for BrowserManagerConfig {
    fn default() -> Self {
        Self {
            debug_port: 9222,
            viewport_width: 1280,
            viewport_height: 800,
            profile_dir: None,
            chrome_path: None,
            headless: true,
            launch_timeout: Duration::from_millis(6000),
        }
    }
}

impl BrowserManagerConfig {
    /// Get the profile directory, creating default if not specified.
    pub fn get_profile_dir(&self) -> PathBuf {
        self.profile_dir.clone().unwrap_or_else(|| {
            std::env::temp_dir().join("newsforge-browser-profile")
        })
    }

    /// Get the CDP endpoint URL.
    pub fn endpoint(&self) -> String {
        format!("http://localhost:{}", self.debug_port)
    }
}
