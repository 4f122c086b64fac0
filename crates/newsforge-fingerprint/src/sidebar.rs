//! Sidebar presence heuristic.

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

/// Returns the bounding box of the first element matching a sidebar selector,
/// or `null` when none matches.
pub const SIDEBAR_PROBE: &str = r#"(() => {
  const selectors = ['aside', '.sidebar', '[role="complementary"]', '.side-column', '.widget-area'];
  for (const selector of selectors) {
    const el = document.querySelector(selector);
    if (el) {
      const rect = el.getBoundingClientRect();
      return { selector, width: rect.width, height: rect.height };
    }
  }
  return null;
})()"#;

/// Smallest width and height, exclusive, of a real sidebar column.
const MIN_SIDEBAR_PX: f64 = 100.0;

/// First sidebar-like element found on the page.
#[derive(Debug, Clone, Deserialize)]
pub struct SidebarCandidate {
    pub selector: String,
    pub width: f64,
    pub height: f64,
}

impl SidebarCandidate {
    /// Large enough to be a content column rather than a decorative or hidden element.
    pub fn is_substantial(&self) -> bool {
        self.width > MIN_SIDEBAR_PX && self.height > MIN_SIDEBAR_PX
    }
}

/// Interpret the [`SIDEBAR_PROBE`] result.
pub fn detect(value: &Value) -> bool {
    if value.is_null() {
        return false;
    }

    match serde_json::from_value::<SidebarCandidate>(value.clone()) {
        Ok(candidate) => candidate.is_substantial(),
        Err(e) => {
            warn!("Unexpected sidebar probe result: {}", e);
            false
        }
    }
}
