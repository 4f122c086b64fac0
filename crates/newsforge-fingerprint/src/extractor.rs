//! Extraction orchestrator.
//!
//! Runs one complete fingerprint extraction over a single isolated browser
//! session: navigate, strip scripts, run the four probes against the now
//! static DOM, capture a viewport screenshot, close. The session is closed on
//! every exit path.

use std::sync::Arc;
use std::time::{Duration, Instant};

use base64::Engine;
use newsforge_browser::{
    BrowserSession, NavigateOptions, ScreenshotFormat, ScreenshotOptions, SessionProvider,
    WaitUntil,
};
use serde_json::Value;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::ExtractError;
use crate::metadata::{self, LayoutSignals, LAYOUT_PROBE};
use crate::model::ExtractedTemplate;
use crate::sidebar::{self, SIDEBAR_PROBE};
use crate::skeleton::{self, TREE_PROBE};
use crate::style_filter::{self, RULES_PROBE};

/// Removes every `<script>` element so the page stops mutating during analysis.
pub const STRIP_SCRIPTS: &str = "document.querySelectorAll('script').forEach(s => s.remove())";

/// Extractor configuration.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Navigation deadline per extraction.
    pub timeout: Duration,
    /// Maximum extractions in flight; excess callers queue.
    pub max_concurrent: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(30_000),
            max_concurrent: 4,
        }
    }
}

/// Runs extractions against sessions from a [`SessionProvider`].
pub struct Extractor {
    provider: Arc<dyn SessionProvider>,
    permits: Arc<Semaphore>,
    config: ExtractorConfig,
}

impl Extractor {
    pub fn new(provider: Arc<dyn SessionProvider>, config: ExtractorConfig) -> Self {
        let permits = Arc::new(Semaphore::new(config.max_concurrent.max(1)));
        Self {
            provider,
            permits,
            config,
        }
    }

    /// Extract a layout fingerprint using the configured timeout.
    pub async fn extract(&self, url: &str) -> Result<ExtractedTemplate, ExtractError> {
        self.extract_with_timeout(url, self.config.timeout).await
    }

    /// Extract a layout fingerprint, failing if navigation exceeds `timeout`.
    pub async fn extract_with_timeout(
        &self,
        url: &str,
        timeout: Duration,
    ) -> Result<ExtractedTemplate, ExtractError> {
        let url = parse_url(url)?;

        let _permit = self.permits.acquire().await.map_err(|_| {
            ExtractError::ExtractionFailed("Failed to acquire extraction permit".to_string())
        })?;

        let started = Instant::now();
        info!("Extracting layout from {}", url);

        let session = self
            .provider
            .acquire_session()
            .await
            .map_err(ExtractError::from_acquire)?;
        let guard = SessionGuard::new(session);

        let result = match guard.session() {
            Some(session) => run(session, url.as_str(), timeout).await,
            None => Err(ExtractError::ExtractionFailed("Session already released".to_string())),
        };
        guard.close().await;

        let elapsed_ms = started.elapsed().as_millis();
        match &result {
            Ok(extracted) => info!(
                "Extracted layout from {} in {}ms (columns={}, grid={}, sidebar={})",
                url,
                elapsed_ms,
                extracted.layout_metadata.columns,
                extracted.layout_metadata.grid_system,
                extracted.has_sidebar
            ),
            Err(e) => warn!("Extraction of {} failed after {}ms: {}", url, elapsed_ms, e),
        }
        result
    }
}

/// Accept only absolute `http`/`https` URLs.
fn parse_url(raw: &str) -> Result<Url, ExtractError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ExtractError::ExtractionFailed(format!("Invalid URL '{}': {}", raw, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(ExtractError::ExtractionFailed(format!(
            "Unsupported URL scheme '{}': {}",
            scheme, raw
        ))),
    }
}

async fn run(
    session: &dyn BrowserSession,
    url: &str,
    timeout: Duration,
) -> Result<ExtractedTemplate, ExtractError> {
    let options = NavigateOptions {
        wait_until: WaitUntil::NetworkIdle,
        timeout,
    };
    match tokio::time::timeout(timeout, session.navigate(url, options)).await {
        Ok(result) => result.map_err(|e| ExtractError::during("Navigation", e))?,
        Err(_) => {
            return Err(ExtractError::ExtractionFailed(format!(
                "Navigation timed out after {}ms",
                timeout.as_millis()
            )))
        }
    }
    debug!("Navigation to {} settled", url);

    evaluate(session, STRIP_SCRIPTS).await?;

    let (rules, tree, layout, sidebar_candidate) = tokio::try_join!(
        evaluate(session, RULES_PROBE),
        evaluate(session, TREE_PROBE),
        evaluate(session, LAYOUT_PROBE),
        evaluate(session, SIDEBAR_PROBE),
    )?;
    debug!("Probes finished for {}", url);

    let css_styles = style_filter::filter_probe_result(&rules);
    let html_structure = skeleton::render_skeleton(skeleton::parse_tree(&tree).as_ref());
    let layout_metadata = metadata::analyze(&LayoutSignals::from_probe(&layout));
    let has_sidebar = sidebar::detect(&sidebar_candidate);

    let png = session
        .screenshot(ScreenshotOptions {
            format: ScreenshotFormat::Png,
            full_page: false,
        })
        .await
        .map_err(|e| ExtractError::during("Screenshot", e))?;

    Ok(ExtractedTemplate {
        css_styles,
        html_structure,
        has_sidebar,
        layout_metadata,
        preview_image: data_url(ScreenshotFormat::Png, &png),
    })
}

async fn evaluate(session: &dyn BrowserSession, script: &str) -> Result<Value, ExtractError> {
    session
        .evaluate(script)
        .await
        .map_err(|e| ExtractError::during("Script evaluation", e))
}

fn data_url(format: ScreenshotFormat, bytes: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        format.mime_type(),
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

/// Owns a session until it is closed.
///
/// [`SessionGuard::close`] is the normal path. A guard dropped while still
/// holding its session (the extraction future was cancelled) closes it on
/// the current runtime instead.
struct SessionGuard {
    session: Option<Box<dyn BrowserSession>>,
}

impl SessionGuard {
    fn new(session: Box<dyn BrowserSession>) -> Self {
        Self {
            session: Some(session),
        }
    }

    fn session(&self) -> Option<&dyn BrowserSession> {
        self.session.as_deref()
    }

    async fn close(mut self) {
        if let Some(session) = self.session.take() {
            if let Err(e) = session.close().await {
                warn!("Failed to close browser session: {}", e);
            }
        }
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(e) = session.close().await {
                        warn!("Failed to close abandoned browser session: {}", e);
                    }
                });
            }
            Err(_) => warn!("Browser session dropped outside a runtime; not closed"),
        }
    }
}

#[cfg(test)]
#[path = "extractor_tests.rs"]
mod tests;
