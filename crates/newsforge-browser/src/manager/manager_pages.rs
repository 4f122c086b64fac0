//! Isolated page sessions handed out by the BrowserManager.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine;
use serde_json::Value;
use tracing::{debug, warn};

use crate::cdp::{CdpClient, PageSession};
use crate::page::{BrowserSession, NavigateOptions, ScreenshotOptions, SessionProvider};
use super::{BrowserError, BrowserManager};

/// A page living in its own browser context on the shared connection.
pub struct CdpBrowserSession {
    client: Arc<CdpClient>,
    context_id: String,
    page: PageSession,
    closed: AtomicBool,
}

impl CdpBrowserSession {
    /// Target id of the underlying page.
    pub fn target_id(&self) -> &str {
        self.page.target_id()
    }

    fn ensure_open(&self) -> Result<(), BrowserError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(BrowserError::SessionClosed);
        }
        Ok(())
    }
}

#[async_trait]
impl BrowserSession for CdpBrowserSession {
    async fn navigate(&self, url: &str, options: NavigateOptions) -> Result<(), BrowserError> {
        self.ensure_open()?;
        self.page
            .navigate(url, options.wait_until, options.timeout)
            .await?;
        Ok(())
    }

    async fn evaluate(&self, script: &str) -> Result<Value, BrowserError> {
        self.ensure_open()?;
        Ok(self.page.evaluate(script).await?)
    }

    async fn screenshot(&self, options: ScreenshotOptions) -> Result<Vec<u8>, BrowserError> {
        self.ensure_open()?;
        let data = self
            .page
            .screenshot(options.format, options.full_page)
            .await
            .map_err(|e| BrowserError::ScreenshotFailed(e.to_string()))?;

        base64::engine::general_purpose::STANDARD
            .decode(data)
            .map_err(|e| BrowserError::ScreenshotFailed(format!("Invalid image data: {}", e)))
    }

    async fn close(&self) -> Result<(), BrowserError> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        // Disposing the context closes the page too; close the target first so
        // its event route is removed even if disposal fails.
        if let Err(e) = self.client.close_page(&self.page).await {
            warn!("Failed to close page {}: {}", self.page.target_id(), e);
        }
        self.client.dispose_browser_context(&self.context_id).await?;

        debug!("Closed session in context {}", self.context_id);
        Ok(())
    }
}

#[async_trait]
impl SessionProvider for BrowserManager {
    async fn acquire_session(&self) -> Result<Box<dyn BrowserSession>, BrowserError> {
        let client = self.client().await?;

        let context_id = client.create_browser_context().await?;
        let page = match client.new_page(&context_id).await {
            Ok(page) => page,
            Err(e) => {
                if let Err(dispose) = client.dispose_browser_context(&context_id).await {
                    warn!("Failed to dispose context {}: {}", context_id, dispose);
                }
                return Err(e.into());
            }
        };

        let session = CdpBrowserSession {
            client,
            context_id,
            page,
            closed: AtomicBool::new(false),
        };

        if let Err(e) = session
            .page
            .set_viewport(self.config.viewport_width, self.config.viewport_height)
            .await
        {
            if let Err(close) = session.close().await {
                warn!("Failed to release session after viewport error: {}", close);
            }
            return Err(e.into());
        }

        debug!("Acquired session {}", session.target_id());
        Ok(Box::new(session))
    }
}
