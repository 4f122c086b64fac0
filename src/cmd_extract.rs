//! Extraction subcommand handlers for newsforge.

use std::path::Path;

use tracing::error;

use newsforge_fingerprint::{synthesize, LayoutMetadata};

use crate::app::App;

/// Extract a page and persist it as a template.
pub(crate) async fn extract(
    app: &App,
    url: &str,
    name: &str,
    brand: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let template = app
        .service()
        .extract_template(url, name, brand)
        .await
        .inspect_err(|e| error!("Failed to extract template: {}", e))?;

    println!("{}", serde_json::to_string_pretty(&template)?);
    Ok(())
}

/// Print the raw fingerprint of a page.
pub(crate) async fn fingerprint(
    app: &App,
    url: &str,
    with_preview: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut extracted = app
        .extractor()
        .extract(url)
        .await
        .inspect_err(|e| error!("Failed to extract template: {}", e))?;

    if !with_preview {
        extracted.preview_image.clear();
    }

    println!("{}", serde_json::to_string_pretty(&extracted)?);
    Ok(())
}

/// Print synthesized CSS for a stored layout fingerprint.
pub(crate) async fn synthesize_file(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let json = tokio::fs::read_to_string(path).await?;
    let metadata = parse_metadata(&json)?;
    print!("{}", synthesize(&metadata));
    Ok(())
}

/// Accept either a bare `LayoutMetadata` document or any object carrying
/// one under `layoutMetadata` (an extracted fingerprint or a template).
fn parse_metadata(json: &str) -> Result<LayoutMetadata, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    match value.get("layoutMetadata") {
        Some(inner) => serde_json::from_value(inner.clone()),
        None => serde_json::from_value(value),
    }
}
