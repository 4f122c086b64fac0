//! Layout fingerprint extraction and template synthesis.
//!
//! Given a published article page, [`Extractor`] drives it through an
//! isolated browser session and derives a structural and stylistic
//! fingerprint ([`LayoutMetadata`]); [`synthesize`] turns that fingerprint
//! into a self-contained stylesheet; [`TemplateService`] ties both together
//! and stores the result as a [`Template`].
//!
//! Each analysis step is split into a JavaScript probe that gathers raw
//! signals inside the page and a pure Rust function that interprets them:
//!
//! | Step | Probe | Interpretation |
//! |------|-------|----------------|
//! | Style rules | [`style_filter::RULES_PROBE`] | [`style_filter::filter_rules`] |
//! | Skeleton | [`skeleton::TREE_PROBE`] | [`skeleton::render_skeleton`] |
//! | Layout | [`metadata::LAYOUT_PROBE`] | [`metadata::analyze`] |
//! | Sidebar | [`sidebar::SIDEBAR_PROBE`] | [`sidebar::detect`] |

mod error;
pub mod extractor;
pub mod metadata;
mod model;
pub mod sidebar;
pub mod skeleton;
pub mod style_filter;
pub mod synthesizer;
pub mod template;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::ExtractError;
pub use extractor::{Extractor, ExtractorConfig};
pub use model::{ColorScheme, ExtractedTemplate, GridSystem, LayoutMetadata, Responsive, Typography};
pub use skeleton::{render_article, FALLBACK_SKELETON};
pub use synthesizer::synthesize;
pub use template::{
    FileTemplateStore, MemoryTemplateStore, NewTemplate, ServiceError, StoreError, Template,
    TemplateService, TemplateStore, EXTRACTION_METHOD,
};
