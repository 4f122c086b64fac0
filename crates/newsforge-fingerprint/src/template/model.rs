//! Template entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::LayoutMetadata;

/// Provenance tag for templates produced by browser extraction.
pub const EXTRACTION_METHOD: &str = "automated-browser";

/// A reusable article template derived from a source page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    pub brand_id: Option<String>,
    /// Synthesized stylesheet, not the page's own rules.
    pub css_styles: String,
    pub html_structure: String,
    pub has_sidebar: bool,
    pub layout_metadata: LayoutMetadata,
    pub is_active: bool,
    pub source_url: String,
    pub extraction_method: String,
    pub preview_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when creating a template.
#[derive(Debug, Clone)]
pub struct NewTemplate {
    pub name: String,
    pub brand_id: Option<String>,
    pub css_styles: String,
    pub html_structure: String,
    pub has_sidebar: bool,
    pub layout_metadata: LayoutMetadata,
    pub source_url: String,
    pub extraction_method: String,
}

impl Template {
    /// Assign an id and timestamps to a new, active template.
    pub fn create(new: NewTemplate) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: new.name,
            brand_id: new.brand_id,
            css_styles: new.css_styles,
            html_structure: new.html_structure,
            has_sidebar: new.has_sidebar,
            layout_metadata: new.layout_metadata,
            is_active: true,
            source_url: new.source_url,
            extraction_method: new.extraction_method,
            preview_image: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub(crate) fn deactivate(&mut self) {
        if self.is_active {
            self.is_active = false;
            self.updated_at = Utc::now();
        }
    }

    pub(crate) fn attach_preview(&mut self, image: String) {
        self.preview_image = Some(image);
        self.updated_at = Utc::now();
    }
}
