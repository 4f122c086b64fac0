//! Scripted browser sessions for orchestrator and service tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use newsforge_browser::{
    BrowserError, BrowserSession, NavigateOptions, ScreenshotOptions, SessionProvider,
};
use parking_lot::Mutex;
use serde_json::{json, Value};

use crate::extractor::STRIP_SCRIPTS;
use crate::metadata::LAYOUT_PROBE;
use crate::sidebar::SIDEBAR_PROBE;
use crate::skeleton::TREE_PROBE;
use crate::style_filter::RULES_PROBE;

pub(crate) const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

/// How the fake page answers `navigate`.
#[derive(Debug, Clone)]
pub(crate) enum Navigation {
    Ok,
    Delay(Duration),
    Timeout,
    Fail(String),
}

/// Canned probe answers for one page.
#[derive(Debug, Clone)]
pub(crate) struct FakePage {
    pub rules: Value,
    pub tree: Value,
    pub layout: Value,
    pub sidebar: Value,
    pub navigation: Navigation,
    /// Probe script that raises a JavaScript exception.
    pub failing_script: Option<&'static str>,
}

impl Default for FakePage {
    fn default() -> Self {
        Self {
            rules: json!([]),
            tree: Value::Null,
            layout: Value::Null,
            sidebar: Value::Null,
            navigation: Navigation::Ok,
            failing_script: None,
        }
    }
}

impl FakePage {
    /// Grid article with two tracks, a 300x600 sidebar and one breakpoint.
    pub fn grid_article() -> Self {
        Self {
            rules: json!([
                "article { display: grid; grid-template-columns: 1fr 1fr; }",
                ".promo-banner { color: red; }",
                "aside.sidebar { width: 300px; }",
                "@media (max-width: 768px) { article { grid-template-columns: 1fr; } }",
            ]),
            tree: json!({
                "tag": "article",
                "id": "story",
                "classes": ["post"],
                "children": [
                    {"tag": "h1", "id": "", "classes": [], "children": []},
                    {"tag": "section", "id": "", "classes": ["body"], "children": [
                        {"tag": "p", "id": "", "classes": [], "children": []}
                    ]},
                    {"tag": "script", "id": "", "classes": [], "children": []}
                ]
            }),
            layout: json!({
                "root": {
                    "display": "grid",
                    "float": "none",
                    "gridTemplateColumns": "450px 450px",
                    "width": 900,
                    "childWidths": [450, 450]
                },
                "fonts": ["Georgia, serif", "Georgia, serif", "Arial, sans-serif"],
                "headingSizes": ["40px", "32px", "24px"],
                "body": {
                    "fontSize": "18px",
                    "backgroundColor": "rgb(255, 255, 255)",
                    "color": "rgb(34, 34, 34)",
                    "borderColor": "rgb(221, 221, 221)"
                },
                "linkColor": "rgb(0, 102, 204)",
                "mediaQueries": ["(max-width: 768px)", "(max-width: 768px)"]
            }),
            sidebar: json!({"selector": "aside", "width": 300, "height": 600}),
            navigation: Navigation::Ok,
            failing_script: None,
        }
    }
}

/// Shared counters observed by tests.
#[derive(Debug, Default)]
pub(crate) struct Counters {
    pub acquired: AtomicUsize,
    pub closed: AtomicUsize,
    pub active: AtomicUsize,
    pub max_active: AtomicUsize,
    pub scripts: Mutex<Vec<String>>,
    pub navigated: Mutex<Vec<String>>,
}

impl Counters {
    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn acquired(&self) -> usize {
        self.acquired.load(Ordering::SeqCst)
    }

    pub fn max_active(&self) -> usize {
        self.max_active.load(Ordering::SeqCst)
    }
}

pub(crate) struct FakeSession {
    page: FakePage,
    counters: Arc<Counters>,
}

impl FakeSession {
    pub fn new(page: FakePage, counters: Arc<Counters>) -> Self {
        Self { page, counters }
    }
}

#[async_trait]
impl BrowserSession for FakeSession {
    async fn navigate(&self, url: &str, options: NavigateOptions) -> Result<(), BrowserError> {
        self.counters.navigated.lock().push(url.to_string());
        match &self.page.navigation {
            Navigation::Ok => Ok(()),
            Navigation::Delay(delay) => {
                tokio::time::sleep(*delay).await;
                Ok(())
            }
            Navigation::Timeout => Err(BrowserError::Timeout(format!(
                "Navigation exceeded {}ms",
                options.timeout.as_millis()
            ))),
            Navigation::Fail(message) => Err(BrowserError::NavigationFailed(message.clone())),
        }
    }

    async fn evaluate(&self, script: &str) -> Result<Value, BrowserError> {
        self.counters.scripts.lock().push(script.to_string());
        if self.page.failing_script == Some(script) {
            return Err(BrowserError::Evaluation("ReferenceError: boom".to_string()));
        }

        let value = if script == RULES_PROBE {
            self.page.rules.clone()
        } else if script == TREE_PROBE {
            self.page.tree.clone()
        } else if script == LAYOUT_PROBE {
            self.page.layout.clone()
        } else if script == SIDEBAR_PROBE {
            self.page.sidebar.clone()
        } else if script == STRIP_SCRIPTS {
            Value::Null
        } else {
            return Err(BrowserError::Evaluation(format!("Unexpected script: {}", script)));
        };
        Ok(value)
    }

    async fn screenshot(&self, _options: ScreenshotOptions) -> Result<Vec<u8>, BrowserError> {
        Ok(PNG_BYTES.to_vec())
    }

    async fn close(&self) -> Result<(), BrowserError> {
        self.counters.closed.fetch_add(1, Ordering::SeqCst);
        self.counters.active.fetch_sub(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Hands out [`FakeSession`]s over the same page.
pub(crate) struct FakeProvider {
    page: FakePage,
    unavailable: bool,
    pub counters: Arc<Counters>,
}

impl FakeProvider {
    pub fn new(page: FakePage) -> Self {
        Self {
            page,
            unavailable: false,
            counters: Arc::new(Counters::default()),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::new(FakePage::default())
        }
    }
}

#[async_trait]
impl SessionProvider for FakeProvider {
    async fn acquire_session(&self) -> Result<Box<dyn BrowserSession>, BrowserError> {
        if self.unavailable {
            return Err(BrowserError::Unavailable("Chrome not found".to_string()));
        }
        self.counters.acquired.fetch_add(1, Ordering::SeqCst);
        let active = self.counters.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.counters.max_active.fetch_max(active, Ordering::SeqCst);
        Ok(Box::new(FakeSession::new(
            self.page.clone(),
            self.counters.clone(),
        )))
    }
}
