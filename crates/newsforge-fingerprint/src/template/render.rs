//! Standalone HTML page for an article rendered through a template.

use crate::skeleton::{escape_attr, render_article};

use super::Template;

impl Template {
    /// Render a complete HTML document with the template's CSS inlined and its
    /// skeleton filled with `title` and `body_html`.
    pub fn render_page(&self, title: &str, body_html: &str) -> String {
        let article = render_article(&self.html_structure, title, body_html);
        let sidebar = if self.has_sidebar {
            "\n<aside class=\"sidebar\"></aside>"
        } else {
            ""
        };

        format!(
            "<!DOCTYPE html>\n\
             <html lang=\"en\">\n\
             <head>\n\
             <meta charset=\"utf-8\">\n\
             <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
             <title>{title}</title>\n\
             <style>\n{css}</style>\n\
             </head>\n\
             <body>\n\
             <div class=\"article-container\">\n\
             <div class=\"article-content\">{article}</div>{sidebar}\n\
             </div>\n\
             </body>\n\
             </html>\n",
            title = escape_attr(title),
            css = self.css_styles.replace("</style", "<\\/style"),
            article = article,
            sidebar = sidebar,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LayoutMetadata;
    use crate::skeleton::FALLBACK_SKELETON;
    use crate::template::{NewTemplate, EXTRACTION_METHOD};

    fn template(has_sidebar: bool) -> Template {
        Template::create(NewTemplate {
            name: "Daily".to_string(),
            brand_id: None,
            css_styles: "body {\n  margin: 0;\n}\n".to_string(),
            html_structure: FALLBACK_SKELETON.to_string(),
            has_sidebar,
            layout_metadata: LayoutMetadata::default(),
            source_url: "https://news.example.com/".to_string(),
            extraction_method: EXTRACTION_METHOD.to_string(),
        })
    }

    #[test]
    fn test_render_page() {
        let html = template(false).render_page("A <b> title", "<p>Body</p>");
        assert!(html.starts_with("<!DOCTYPE html>\n"));
        assert!(html.contains("<title>A &lt;b&gt; title</title>"));
        assert!(html.contains("<style>\nbody {\n  margin: 0;\n}\n</style>"));
        assert!(html.contains(
            "<div class=\"article-content\"><main class=\"content\"><article>\
             <h1>A &lt;b&gt; title</h1><p>Body</p></article></main></div>"
        ));
        assert!(!html.contains("<aside"));
    }

    #[test]
    fn test_render_page_with_sidebar() {
        let html = template(true).render_page("T", "");
        assert!(html.contains("<aside class=\"sidebar\"></aside>"));
    }
}
