//! Layout fingerprint data model.

use serde::{Deserialize, Serialize};

/// Layout mechanism of the main content container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridSystem {
    Grid,
    Flexbox,
    Float,
    #[default]
    Unknown,
}

impl std::fmt::Display for GridSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GridSystem::Grid => "grid",
            GridSystem::Flexbox => "flexbox",
            GridSystem::Float => "float",
            GridSystem::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Fonts and sizes observed on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    /// Distinct `font-family` values in first-seen order.
    pub fonts: Vec<String>,
    /// Computed sizes of `h1`, `h2`, `h3`, absent levels omitted.
    pub heading_sizes: Vec<String>,
    pub body_size: String,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            fonts: Vec::new(),
            heading_sizes: Vec::new(),
            body_size: "16px".to_string(),
        }
    }
}

/// Page colors as CSS color values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    pub links: String,
    pub borders: String,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#000000".to_string(),
            links: "#0000ff".to_string(),
            borders: "#cccccc".to_string(),
        }
    }
}

/// Responsive behaviour harvested from stylesheets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Responsive {
    /// Distinct media-query condition texts in first-seen order.
    pub breakpoints: Vec<String>,
}

/// Structured fingerprint of a page's layout.
///
/// `columns` is at least 1, `typography.heading_sizes` holds at most three
/// entries and `responsive.breakpoints` never repeats a condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutMetadata {
    pub columns: u32,
    pub grid_system: GridSystem,
    pub typography: Typography,
    pub color_scheme: ColorScheme,
    pub responsive: Responsive,
}

impl Default for LayoutMetadata {
    fn default() -> Self {
        Self {
            columns: 1,
            grid_system: GridSystem::Unknown,
            typography: Typography::default(),
            color_scheme: ColorScheme::default(),
            responsive: Responsive::default(),
        }
    }
}

/// Result of one extraction run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedTemplate {
    /// Layout-relevant rules copied from the source page, not yet synthesized.
    pub css_styles: String,
    pub html_structure: String,
    pub has_sidebar: bool,
    pub layout_metadata: LayoutMetadata,
    /// Viewport screenshot as a `data:` URL.
    pub preview_image: String,
}

/// Append `value` unless it is empty or already present.
pub(crate) fn push_unique(values: &mut Vec<String>, value: &str) {
    let value = value.trim();
    if !value.is_empty() && !values.iter().any(|v| v == value) {
        values.push(value.to_string());
    }
}
