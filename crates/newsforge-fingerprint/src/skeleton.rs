//! Anonymized structural skeleton of the article region.
//!
//! The probe serializes the element tree under the content root; rendering
//! keeps only container tags with their `id`/`class` hooks and replaces
//! textual leaves with placeholder comments. Text content never leaves the
//! page.

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

/// Deepest level rendered, with the root at depth 0.
pub const MAX_DEPTH: usize = 5;

/// Emitted when no content root can be found.
pub const FALLBACK_SKELETON: &str =
    r#"<main class="content"><article><!-- article content --></article></main>"#;

/// Serializes the first matching content root as `{tag, id, classes, children}`,
/// or `null` when no root selector matches.
pub const TREE_PROBE: &str = r#"(() => {
  const roots = ['article', 'main', '[role="main"]', '.content', '.article'];
  let root = null;
  for (const selector of roots) {
    root = document.querySelector(selector);
    if (root) break;
  }
  if (!root) return null;
  const walk = (el, depth) => ({
    tag: el.tagName.toLowerCase(),
    id: el.id || '',
    classes: Array.from(el.classList),
    children: depth >= 5 ? [] : Array.from(el.children).map(c => walk(c, depth + 1)),
  });
  return walk(root, 0);
})()"#;

const CONTAINER_TAGS: &[&str] = &["article", "main", "section"];
const CONTAINER_CLASSES: &[&str] = &["content", "article"];
const TEXT_TAGS: &[&str] = &["h1", "h2", "h3", "p"];

/// One element of the serialized tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SkeletonNode {
    pub tag: String,
    pub id: String,
    pub classes: Vec<String>,
    pub children: Vec<SkeletonNode>,
}

impl SkeletonNode {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn with_child(mut self, child: SkeletonNode) -> Self {
        self.children.push(child);
        self
    }

    fn is_container(&self) -> bool {
        CONTAINER_TAGS.contains(&self.tag.as_str())
            || self
                .classes
                .iter()
                .any(|c| CONTAINER_CLASSES.contains(&c.as_str()))
    }

    fn is_text(&self) -> bool {
        TEXT_TAGS.contains(&self.tag.as_str())
    }
}

/// Parse the [`TREE_PROBE`] result. `null` and malformed values yield `None`.
pub fn parse_tree(value: &Value) -> Option<SkeletonNode> {
    if value.is_null() {
        return None;
    }
    match serde_json::from_value::<SkeletonNode>(value.clone()) {
        Ok(node) if !node.tag.is_empty() => Some(node),
        Ok(_) => None,
        Err(e) => {
            warn!("Unexpected skeleton probe result: {}", e);
            None
        }
    }
}

/// Render the skeleton for a content root, or the fallback when there is none.
///
/// The selected root is always rendered as a container, even when neither its
/// tag nor its classes would qualify (e.g. `<div role="main">`).
pub fn render_skeleton(root: Option<&SkeletonNode>) -> String {
    let Some(root) = root else {
        return FALLBACK_SKELETON.to_string();
    };

    let mut out = String::new();
    render_container(root, 0, &mut out);
    out
}

fn render_node(node: &SkeletonNode, depth: usize, out: &mut String) {
    if depth > MAX_DEPTH {
        return;
    }
    if node.is_container() {
        render_container(node, depth, out);
    } else if node.is_text() {
        out.push_str(&placeholder(&node.tag));
    }
}

fn render_container(node: &SkeletonNode, depth: usize, out: &mut String) {
    out.push('<');
    out.push_str(&node.tag);
    if !node.id.is_empty() {
        out.push_str(&format!(" id=\"{}\"", escape_attr(&node.id)));
    }
    if !node.classes.is_empty() {
        out.push_str(&format!(" class=\"{}\"", escape_attr(&node.classes.join(" "))));
    }
    out.push('>');

    for child in &node.children {
        render_node(child, depth + 1, out);
    }

    out.push_str("</");
    out.push_str(&node.tag);
    out.push('>');
}

fn placeholder(tag: &str) -> String {
    format!("<!-- {} content -->", tag)
}

pub(crate) fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Fill a skeleton's placeholders with an article.
///
/// The first `h1` placeholder becomes the title heading; the first `p`
/// placeholder (or the generic `article` one) becomes `body_html`, inserted
/// as-is. Leftover placeholders are removed. When the skeleton has no `h1`
/// slot the title heading is placed in front of the body.
pub fn render_article(skeleton: &str, title: &str, body_html: &str) -> String {
    let heading = format!("<h1>{}</h1>", escape_attr(title));
    let h1_slot = placeholder("h1");

    let mut html = skeleton.to_string();
    let has_title_slot = html.contains(&h1_slot);
    if has_title_slot {
        html = html.replacen(&h1_slot, &heading, 1);
    }

    let body = if has_title_slot {
        body_html.to_string()
    } else {
        format!("{}{}", heading, body_html)
    };

    let body_slot = [placeholder("p"), placeholder("article")]
        .into_iter()
        .find(|slot| html.contains(slot.as_str()));
    match body_slot {
        Some(slot) => html = html.replacen(&slot, &body, 1),
        None => html.push_str(&body),
    }

    for tag in TEXT_TAGS.iter().copied().chain(["article"]) {
        html = html.replace(&placeholder(tag), "");
    }
    html
}
