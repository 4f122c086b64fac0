//! CSS template synthesis from a layout fingerprint.
//!
//! Output depends only on the [`LayoutMetadata`] passed in, so the same
//! fingerprint always produces byte-identical CSS.

use crate::model::{GridSystem, LayoutMetadata};

const DEFAULT_FONT_STACK: &str =
    "-apple-system, BlinkMacSystemFont, \"Segoe UI\", Roboto, Helvetica, Arial, sans-serif";

const HEADING_FALLBACKS: [(&str, &str); 3] = [("h1", "2.5rem"), ("h2", "2rem"), ("h3", "1.5rem")];

/// Generate a self-contained stylesheet approximating the fingerprinted layout.
///
/// Only the first harvested breakpoint gets a responsive block.
pub fn synthesize(metadata: &LayoutMetadata) -> String {
    let typography = &metadata.typography;
    let colors = &metadata.color_scheme;
    let mut css = String::new();

    let font = typography
        .fonts
        .first()
        .map(|f| sanitize(f))
        .filter(|f| !f.is_empty())
        .unwrap_or_else(|| DEFAULT_FONT_STACK.to_string());

    rule(
        &mut css,
        "body",
        &[
            ("font-family", font),
            ("font-size", sanitize(&typography.body_size)),
            ("color", sanitize(&colors.text)),
            ("background-color", sanitize(&colors.background)),
            ("line-height", "1.6".to_string()),
            ("margin", "0".to_string()),
        ],
    );

    let mut container = vec![
        ("max-width", "1200px".to_string()),
        ("margin", "0 auto".to_string()),
        ("padding", "20px".to_string()),
    ];
    match metadata.grid_system {
        GridSystem::Grid => {
            container.push(("display", "grid".to_string()));
            if metadata.columns > 1 {
                container.push((
                    "grid-template-columns",
                    format!("repeat({}, 1fr)", metadata.columns),
                ));
            }
            container.push(("gap", "20px".to_string()));
        }
        GridSystem::Flexbox => {
            container.push(("display", "flex".to_string()));
            container.push(("gap", "20px".to_string()));
        }
        GridSystem::Float | GridSystem::Unknown => {}
    }
    rule(&mut css, ".article-container", &container);

    rule(
        &mut css,
        ".article-content",
        &[("flex", "1".to_string()), ("min-width", "0".to_string())],
    );

    rule(
        &mut css,
        ".sidebar",
        &[
            ("border-left", format!("1px solid {}", sanitize(&colors.borders))),
            ("padding-left", "20px".to_string()),
        ],
    );

    for (i, (tag, fallback)) in HEADING_FALLBACKS.iter().enumerate() {
        let size = typography
            .heading_sizes
            .get(i)
            .map(|s| sanitize(s))
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| fallback.to_string());
        rule(
            &mut css,
            tag,
            &[("font-size", size), ("line-height", "1.2".to_string())],
        );
    }

    rule(&mut css, "p", &[("margin", "0 0 1em".to_string())]);
    rule(&mut css, "a", &[("color", sanitize(&colors.links))]);
    rule(
        &mut css,
        "a:hover",
        &[("text-decoration", "underline".to_string())],
    );

    if let Some(breakpoint) = metadata.responsive.breakpoints.first() {
        css.push_str(&format!("@media {} {{\n", media_condition(breakpoint)));
        css.push_str("  .article-container {\n    grid-template-columns: 1fr;\n  }\n");
        css.push_str(
            "  .sidebar {\n    width: 100%;\n    border-left: none;\n    padding-left: 0;\n  }\n",
        );
        css.push_str("}\n");
    }

    css
}

fn rule(css: &mut String, selector: &str, declarations: &[(&str, String)]) {
    css.push_str(selector);
    css.push_str(" {\n");
    for (property, value) in declarations {
        css.push_str(&format!("  {}: {};\n", property, value));
    }
    css.push_str("}\n\n");
}

/// Parenthesize a bare feature condition such as `max-width: 768px`.
fn media_condition(breakpoint: &str) -> String {
    let condition = sanitize(breakpoint);
    if !condition.contains('(') && condition.contains(':') {
        format!("({})", condition)
    } else {
        condition
    }
}

/// Remove characters that would let a harvested value escape its declaration.
fn sanitize(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, '{' | '}' | ';' | '<'))
        .collect::<String>()
        .trim()
        .to_string()
}
