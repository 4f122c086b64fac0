//! Extraction error types.

use newsforge_browser::BrowserError;
use thiserror::Error;

/// Errors returned by the extraction orchestrator.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// No browser session could be obtained.
    #[error("Browser unavailable: {0}")]
    BrowserUnavailable(String),

    /// Navigation, script evaluation or screenshot failed.
    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),
}

impl ExtractError {
    pub fn is_browser_unavailable(&self) -> bool {
        matches!(self, ExtractError::BrowserUnavailable(_))
    }

    /// Classify a browser error raised while acquiring a session.
    pub(crate) fn from_acquire(err: BrowserError) -> Self {
        if err.is_unavailable() {
            ExtractError::BrowserUnavailable(err.to_string())
        } else {
            ExtractError::ExtractionFailed(err.to_string())
        }
    }

    /// Wrap a browser error raised while a session was open.
    pub(crate) fn during(step: &str, err: BrowserError) -> Self {
        ExtractError::ExtractionFailed(format!("{}: {}", step, err))
    }
}
