//! Layout metadata analyzer.
//!
//! A single probe reads computed styles off the rendered page into
//! [`LayoutSignals`]; the heuristics below turn those signals into
//! [`LayoutMetadata`]. Every heuristic tolerates missing signals and falls
//! back to a default instead of failing.

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::model::{push_unique, ColorScheme, GridSystem, LayoutMetadata, Responsive, Typography};

/// Gathers the computed-style signals for every layout heuristic.
pub const LAYOUT_PROBE: &str = r#"(() => {
  const css = (el) => window.getComputedStyle(el);
  const rootEl = document.querySelector('main, article, .content');
  let root = null;
  if (rootEl) {
    const s = css(rootEl);
    root = {
      display: s.display,
      float: s.float,
      gridTemplateColumns: s.gridTemplateColumns,
      width: rootEl.getBoundingClientRect().width,
      childWidths: Array.from(rootEl.children).map(c => c.getBoundingClientRect().width),
    };
  }
  const fonts = Array.from(document.querySelectorAll('h1, h2, h3, h4, h5, h6, p, body'))
    .map(el => css(el).fontFamily);
  const headingSizes = ['h1', 'h2', 'h3'].map(tag => {
    const el = document.querySelector(tag);
    return el ? css(el).fontSize : null;
  });
  let body = null;
  if (document.body) {
    const s = css(document.body);
    body = {
      fontSize: s.fontSize,
      backgroundColor: s.backgroundColor,
      color: s.color,
      borderColor: s.borderColor,
    };
  }
  const link = document.querySelector('a');
  const linkColor = link ? css(link).color : null;
  const mediaQueries = [];
  const collect = (rules) => {
    for (const rule of Array.from(rules || [])) {
      if (rule instanceof CSSMediaRule) {
        mediaQueries.push(rule.conditionText || rule.media.mediaText);
      }
      let nested = null;
      try { nested = rule.cssRules; } catch (e) { nested = null; }
      if (nested) collect(nested);
    }
  };
  for (const sheet of Array.from(document.styleSheets)) {
    let rules;
    try { rules = sheet.cssRules; } catch (e) { continue; }
    collect(rules);
  }
  return { root, fonts, headingSizes, body, linkColor, mediaQueries };
})()"#;

/// Computed styles of the content root.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RootSignals {
    pub display: String,
    pub float: String,
    pub grid_template_columns: String,
    pub width: f64,
    pub child_widths: Vec<f64>,
}

/// Computed styles of `<body>`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BodySignals {
    pub font_size: Option<String>,
    pub background_color: Option<String>,
    pub color: Option<String>,
    pub border_color: Option<String>,
}

/// Raw probe output. Absent targets are `None` or empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutSignals {
    pub root: Option<RootSignals>,
    pub fonts: Vec<Option<String>>,
    /// `h1`, `h2`, `h3` in that order; `None` when the level is missing.
    pub heading_sizes: Vec<Option<String>>,
    pub body: Option<BodySignals>,
    pub link_color: Option<String>,
    pub media_queries: Vec<Option<String>>,
}

impl LayoutSignals {
    /// Parse the [`LAYOUT_PROBE`] result, degrading to empty signals.
    pub fn from_probe(value: &Value) -> Self {
        if value.is_null() {
            return Self::default();
        }
        serde_json::from_value(value.clone()).unwrap_or_else(|e| {
            warn!("Unexpected layout probe result: {}", e);
            Self::default()
        })
    }
}

/// Build the full fingerprint from probe signals.
pub fn analyze(signals: &LayoutSignals) -> LayoutMetadata {
    let grid_system = detect_grid_system(signals.root.as_ref());
    LayoutMetadata {
        columns: estimate_columns(grid_system, signals.root.as_ref()),
        grid_system,
        typography: typography(signals),
        color_scheme: color_scheme(signals),
        responsive: Responsive {
            breakpoints: breakpoints(&signals.media_queries),
        },
    }
}

/// Display wins over float; an absent root is [`GridSystem::Unknown`].
pub fn detect_grid_system(root: Option<&RootSignals>) -> GridSystem {
    let Some(root) = root else {
        return GridSystem::Unknown;
    };

    match root.display.trim() {
        "grid" | "inline-grid" => GridSystem::Grid,
        "flex" | "inline-flex" => GridSystem::Flexbox,
        _ => {
            let float = root.float.trim();
            if !float.is_empty() && float != "none" {
                GridSystem::Float
            } else {
                GridSystem::Unknown
            }
        }
    }
}

/// Approximate column count, never below 1.
///
/// Grid roots count their column tracks. Anything else divides the root
/// width by the mean width of its direct children, which misjudges pages
/// with deliberately uneven columns.
pub fn estimate_columns(grid_system: GridSystem, root: Option<&RootSignals>) -> u32 {
    let Some(root) = root else {
        return 1;
    };

    if grid_system == GridSystem::Grid {
        return count_tracks(&root.grid_template_columns).max(1);
    }

    if root.child_widths.is_empty() {
        return 1;
    }
    let mean = root.child_widths.iter().sum::<f64>() / root.child_widths.len() as f64;
    if !mean.is_finite() || mean <= 0.0 || !root.width.is_finite() {
        return 1;
    }

    let ratio = (root.width / mean).round();
    if ratio < 1.0 {
        1
    } else if ratio > u32::MAX as f64 {
        u32::MAX
    } else {
        ratio as u32
    }
}

/// Count tracks in a `grid-template-columns` value.
///
/// Tokens are split on whitespace outside parentheses; `[line-name]` tokens
/// are not tracks. `none` or an empty value counts as one.
pub fn count_tracks(template: &str) -> u32 {
    let template = template.trim();
    if template.is_empty() || template == "none" {
        return 1;
    }

    let mut tracks = 0u32;
    let mut depth = 0usize;
    let mut in_token = false;
    let mut line_name = false;

    for c in template.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ => {}
        }

        if depth == 0 && c.is_whitespace() {
            in_token = false;
            continue;
        }
        if !in_token {
            in_token = true;
            line_name = c == '[';
            if !line_name {
                tracks += 1;
            }
        }
        if line_name && c == ']' {
            in_token = false;
        }
    }

    tracks.max(1)
}

pub fn typography(signals: &LayoutSignals) -> Typography {
    let mut fonts = Vec::new();
    for font in signals.fonts.iter().flatten() {
        push_unique(&mut fonts, font);
    }

    let heading_sizes = signals
        .heading_sizes
        .iter()
        .take(3)
        .flatten()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    let defaults = Typography::default();
    let body_size = signals
        .body
        .as_ref()
        .and_then(|b| non_empty(b.font_size.as_deref()))
        .unwrap_or(defaults.body_size);

    Typography {
        fonts,
        heading_sizes,
        body_size,
    }
}

pub fn color_scheme(signals: &LayoutSignals) -> ColorScheme {
    let defaults = ColorScheme::default();
    let body = signals.body.as_ref();

    ColorScheme {
        background: body
            .and_then(|b| non_empty(b.background_color.as_deref()))
            .unwrap_or(defaults.background),
        text: body
            .and_then(|b| non_empty(b.color.as_deref()))
            .unwrap_or(defaults.text),
        links: non_empty(signals.link_color.as_deref()).unwrap_or(defaults.links),
        borders: body
            .and_then(|b| non_empty(b.border_color.as_deref()))
            .unwrap_or(defaults.borders),
    }
}

/// Distinct media conditions in first-seen order.
pub fn breakpoints(media_queries: &[Option<String>]) -> Vec<String> {
    let mut found = Vec::new();
    for condition in media_queries.iter().flatten() {
        push_unique(&mut found, condition);
    }
    found
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
#[path = "metadata_tests.rs"]
mod tests;
