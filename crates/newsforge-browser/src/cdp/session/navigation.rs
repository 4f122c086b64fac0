//! Navigation operations for CDP page session.

use std::time::Duration;

use serde_json::json;
use tracing::debug;

use crate::cdp::error::CdpError;
use crate::cdp::protocol::{CdpResponse, LifecycleEvent};
use crate::page::WaitUntil;

use super::core::PageSession;

impl PageSession {
    /// Navigate to URL and wait for `wait_until`, all within `timeout`.
    ///
    /// Returns the main frame id.
    pub async fn navigate(
        &self,
        url: &str,
        wait_until: WaitUntil,
        timeout: Duration,
    ) -> Result<String, CdpError> {
        // Lifecycle events from about:blank must not satisfy the wait below.
        self.drain_events().await;

        let navigation = async {
            let result = self
                .call("Page.navigate", Some(json!({"url": url})))
                .await?;

            if let Some(error) = result.get("errorText").and_then(|e| e.as_str()) {
                if !error.is_empty() {
                    return Err(CdpError::NavigationFailed(format!("{}: {}", url, error)));
                }
            }

            let frame_id = result["frameId"].as_str().unwrap_or("main").to_string();
            let loader_id = result["loaderId"].as_str().map(|s| s.to_string());

            match (wait_until, loader_id) {
                (WaitUntil::NetworkIdle, Some(loader_id)) => {
                    self.wait_for_lifecycle("networkIdle", &loader_id).await?
                }
                (WaitUntil::DomContentLoaded, _) => {
                    self.wait_for_ready_state(&["interactive", "complete"]).await?
                }
                // Same-document navigations carry no loader, so no lifecycle events follow.
                _ => self.wait_for_ready_state(&["complete"]).await?,
            }

            Ok(frame_id)
        };

        let frame_id = tokio::time::timeout(timeout, navigation)
            .await
            .map_err(|_| {
                CdpError::Timeout(format!(
                    "Navigation to {} exceeded {} ms",
                    url,
                    timeout.as_millis()
                ))
            })??;

        debug!("Navigated to {}", url);
        Ok(frame_id)
    }

    /// Discard buffered events.
    async fn drain_events(&self) {
        let mut events = self.events.lock().await;
        while events.try_recv().is_ok() {}
    }

    /// Wait for a `Page.lifecycleEvent` named `name` for the given loader.
    async fn wait_for_lifecycle(&self, name: &str, loader_id: &str) -> Result<(), CdpError> {
        let mut events = self.events.lock().await;

        while let Some(event) = events.recv().await {
            if Self::is_detach(&event) {
                return Err(CdpError::SessionClosed);
            }
            if Self::lifecycle_reached(&event, name, loader_id) {
                return Ok(());
            }
        }

        Err(CdpError::SessionClosed)
    }

    /// Whether `event` is the lifecycle milestone `name` of `loader_id`.
    pub(super) fn lifecycle_reached(event: &CdpResponse, name: &str, loader_id: &str) -> bool {
        if event.method.as_deref() != Some("Page.lifecycleEvent") {
            return false;
        }

        event
            .params
            .clone()
            .and_then(|p| serde_json::from_value::<LifecycleEvent>(p).ok())
            .is_some_and(|e| e.name == name && e.loader_id == loader_id)
    }

    pub(super) fn is_detach(event: &CdpResponse) -> bool {
        matches!(
            event.method.as_deref(),
            Some("Inspector.detached") | Some("Inspector.targetCrashed")
        )
    }

    /// Poll `document.readyState` until it is one of `states`.
    async fn wait_for_ready_state(&self, states: &[&str]) -> Result<(), CdpError> {
        loop {
            let result = self.evaluate("document.readyState").await?;

            if let Some(state) = result.as_str() {
                if states.contains(&state) {
                    return Ok(());
                }
            }

            tokio::time::sleep(Duration::from_millis(100)).await;
        }
    }
}
