//! Wiring from configuration to browser, extractor and template store.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use newsforge_browser::{BrowserManager, BrowserManagerConfig};
use newsforge_config::{BrowserConfig, Config, ExtractionConfig};
use newsforge_fingerprint::{Extractor, ExtractorConfig, FileTemplateStore, TemplateService, TemplateStore};

/// Long-lived components shared by every command.
pub(crate) struct App {
    browser: Arc<BrowserManager>,
    extractor: Arc<Extractor>,
    store: Arc<dyn TemplateStore>,
}

impl App {
    /// Build the components. Chrome is not started until the first extraction.
    pub(crate) fn new(config: &Config) -> Self {
        let browser = Arc::new(BrowserManager::new(browser_config(&config.browser)));
        let extractor = Arc::new(Extractor::new(
            browser.clone(),
            extractor_config(&config.extraction),
        ));

        let templates_dir = config.storage.templates_dir();
        info!("Template store: {:?}", templates_dir);
        let store: Arc<dyn TemplateStore> = Arc::new(FileTemplateStore::new(templates_dir));

        Self {
            browser,
            extractor,
            store,
        }
    }

    pub(crate) fn extractor(&self) -> &Arc<Extractor> {
        &self.extractor
    }

    pub(crate) fn service(&self) -> TemplateService {
        TemplateService::new(self.extractor.clone(), self.store.clone())
    }

    /// Stop the shared browser if one was started.
    pub(crate) async fn shutdown(&self) {
        if let Err(e) = self.browser.shutdown().await {
            warn!("Browser shutdown failed: {}", e);
        }
    }
}

pub(crate) fn browser_config(config: &BrowserConfig) -> BrowserManagerConfig {
    BrowserManagerConfig {
        debug_port: config.debug_port,
        viewport_width: config.viewport_width,
        viewport_height: config.viewport_height,
        profile_dir: Some(config.profile_dir()),
        chrome_path: config.chrome_path.clone(),
        headless: config.headless,
        launch_timeout: Duration::from_millis(config.launch_timeout_ms),
    }
}

pub(crate) fn extractor_config(config: &ExtractionConfig) -> ExtractorConfig {
    ExtractorConfig {
        timeout: Duration::from_millis(config.timeout_ms),
        max_concurrent: config.max_concurrent,
    }
}
