//! Layout-relevant CSS rule filter.

use serde_json::Value;
use tracing::warn;

/// Returns the `cssText` of every rule in every readable stylesheet, in order.
///
/// Cross-origin sheets without CORS throw on `cssRules` access and are skipped.
pub const RULES_PROBE: &str = r#"(() => {
  const rules = [];
  for (const sheet of Array.from(document.styleSheets)) {
    let list;
    try { list = sheet.cssRules; } catch (e) { continue; }
    if (!list) continue;
    for (const rule of Array.from(list)) rules.push(rule.cssText);
  }
  return rules;
})()"#;

/// Substrings that mark a rule as structural or typographic.
const LAYOUT_KEYWORDS: &[&str] = &[
    "article",
    "main",
    "content",
    "container",
    "layout",
    "grid",
    "sidebar",
    "header",
    "h1",
    "h2",
    "h3",
    "body",
    "p {",
    "@media",
];

/// Whether a rule's text mentions any layout keyword.
pub fn is_layout_rule(rule: &str) -> bool {
    LAYOUT_KEYWORDS.iter().any(|k| rule.contains(k))
}

/// Keep layout-relevant rules, joined by blank lines in source order.
pub fn filter_rules<S: AsRef<str>>(rules: &[S]) -> String {
    rules
        .iter()
        .map(AsRef::as_ref)
        .filter(|r| is_layout_rule(r))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Interpret the [`RULES_PROBE`] result.
pub fn filter_probe_result(value: &Value) -> String {
    match value {
        Value::Array(items) => {
            let rules: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            filter_rules(&rules)
        }
        Value::Null => String::new(),
        other => {
            warn!("Unexpected stylesheet probe result: {}", other);
            String::new()
        }
    }
}
