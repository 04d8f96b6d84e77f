//! Reading pane
//!
//! Renders every section in document order as a `<section>` anchored by its
//! id, and reports pointer entry into a section to the tracker.

use std::collections::HashMap;
use std::fmt::Write;
use std::sync::Arc;

use html_escape::{encode_double_quoted_attribute, encode_text};
use serde::Serialize;

use crate::document::{ContentItem, Document, Section};

use super::tracker::ActiveSectionTracker;

/// Alt text used for figures without a caption
const DEFAULT_FIGURE_ALT: &str = "Paper Figure";

/// Heading treatment for a section header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingTier {
    Primary,
    Secondary,
}

impl HeadingTier {
    pub fn for_level(level: u32) -> Self {
        if level <= 1 {
            HeadingTier::Primary
        } else {
            HeadingTier::Secondary
        }
    }

    fn class(self) -> &'static str {
        match self {
            HeadingTier::Primary => "heading-primary",
            HeadingTier::Secondary => "heading-secondary",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    Smooth,
}

/// Instruction for the client to bring an anchor into view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScrollCommand {
    pub anchor: String,
    pub behavior: ScrollBehavior,
}

#[derive(Debug, Clone)]
pub struct ReadingPane {
    document: Arc<Document>,
    /// section id -> position in reading order
    anchors: HashMap<String, usize>,
}

impl ReadingPane {
    pub fn new(document: Arc<Document>) -> Self {
        let anchors = document
            .sections
            .iter()
            .enumerate()
            .map(|(position, section)| (section.id.clone(), position))
            .collect();

        Self { document, anchors }
    }

    /// Position of the anchor for `id`, if the pane rendered one
    pub fn locate(&self, id: &str) -> Option<usize> {
        self.anchors.get(id).copied()
    }

    /// Smooth-scroll command for `id`, or `None` when there is no such anchor
    pub fn scroll_to(&self, id: &str) -> Option<ScrollCommand> {
        self.locate(id).map(|_| ScrollCommand {
            anchor: id.to_string(),
            behavior: ScrollBehavior::Smooth,
        })
    }

    /// Pointer entered the region of section `id`
    ///
    /// Returns whether the active section changed. Ids the pane did not
    /// render are ignored.
    pub fn enter_section(&self, id: &str, tracker: &ActiveSectionTracker) -> bool {
        if self.locate(id).is_none() {
            tracing::debug!(section = %id, "Ignoring entry into unknown section");
            return false;
        }
        tracker.set(id)
    }

    /// Render all sections
    pub fn render(&self) -> String {
        let mut html = String::with_capacity(4096);
        html.push_str("<article class=\"reading-pane\">");
        for section in &self.document.sections {
            render_section(&mut html, section);
        }
        html.push_str("</article>");
        html
    }
}

fn render_section(html: &mut String, section: &Section) {
    let tier = HeadingTier::for_level(section.level);
    let id = encode_double_quoted_attribute(&section.id);

    let _ = write!(
        html,
        "<section id=\"{id}\" class=\"paper-section\" data-section=\"{id}\">\
         <h3 class=\"{}\">{}</h3><div class=\"section-body\">",
        tier.class(),
        encode_text(&section.title),
    );

    for item in &section.content {
        render_item(html, item);
    }

    html.push_str("</div></section>");
}

fn render_item(html: &mut String, item: &ContentItem) {
    match item {
        ContentItem::Text { value } => {
            let _ = write!(html, "<p class=\"paragraph\">{}</p>", encode_text(value));
        }
        ContentItem::Image { value, caption } => {
            html.push_str("<figure class=\"figure\">");

            let alt = caption.as_deref().unwrap_or(DEFAULT_FIGURE_ALT);
            if is_renderable_source(value) {
                // A broken reference collapses to the placeholder style, the figure stays
                let _ = write!(
                    html,
                    "<img src=\"{}\" alt=\"{}\" loading=\"lazy\" \
                     onerror=\"this.removeAttribute('src');this.classList.add('figure-missing')\">",
                    encode_double_quoted_attribute(value),
                    encode_double_quoted_attribute(alt),
                );
            } else {
                tracing::debug!("Replacing unusable image reference with placeholder");
                let _ = write!(
                    html,
                    "<div class=\"figure-missing\" role=\"img\" aria-label=\"{}\"></div>",
                    encode_double_quoted_attribute(alt),
                );
            }

            if let Some(caption) = caption {
                let _ = write!(html, "<figcaption>{}</figcaption>", encode_text(caption));
            }
            html.push_str("</figure>");
        }
    }
}

/// Whether an image reference can be used as an `<img src>`
fn is_renderable_source(value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() {
        return false;
    }

    let lower = value.to_ascii_lowercase();
    if lower.starts_with("data:") {
        return lower.starts_with("data:image/");
    }
    !(lower.starts_with("javascript:") || lower.starts_with("vbscript:"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(id: &str, level: u32, content: Vec<ContentItem>) -> Section {
        Section {
            id: id.to_string(),
            title: format!("Title {}", id),
            level,
            content,
        }
    }

    fn pane(sections: Vec<Section>) -> ReadingPane {
        ReadingPane::new(Arc::new(Document {
            title: "Paper".to_string(),
            sections,
        }))
    }

    #[test]
    fn test_sections_render_in_order_with_anchors() {
        let pane = pane(vec![
            section("s1", 1, vec![ContentItem::Text { value: "Hello".to_string() }]),
            section("s2", 2, vec![]),
        ]);
        let html = pane.render();

        let first = html.find("id=\"s1\"").unwrap();
        let second = html.find("id=\"s2\"").unwrap();
        assert!(first < second);
        assert!(html.contains("<p class=\"paragraph\">Hello</p>"));
        assert_eq!(pane.locate("s2"), Some(1));
        assert_eq!(pane.locate("missing"), None);
    }

    #[test]
    fn test_heading_tiers() {
        assert_eq!(HeadingTier::for_level(1), HeadingTier::Primary);
        assert_eq!(HeadingTier::for_level(2), HeadingTier::Secondary);
        assert_eq!(HeadingTier::for_level(5), HeadingTier::Secondary);

        let html = pane(vec![section("a", 1, vec![]), section("b", 3, vec![])]).render();
        assert!(html.contains("<h3 class=\"heading-primary\">Title a</h3>"));
        assert!(html.contains("<h3 class=\"heading-secondary\">Title b</h3>"));
    }

    #[test]
    fn test_text_is_rendered_verbatim() {
        let html = pane(vec![section(
            "s1",
            1,
            vec![ContentItem::Text {
                value: "**not bold** <script>alert(1)</script> & more".to_string(),
            }],
        )])
        .render();

        assert!(html.contains("**not bold** &lt;script&gt;alert(1)&lt;/script&gt; &amp; more"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_image_with_caption() {
        let html = pane(vec![section(
            "s2",
            2,
            vec![ContentItem::Image {
                value: "fig1.png".to_string(),
                caption: Some("Setup".to_string()),
            }],
        )])
        .render();

        assert!(html.contains("<img src=\"fig1.png\" alt=\"Setup\""));
        assert!(html.contains("onerror="));
        assert!(html.contains("<figcaption>Setup</figcaption>"));
    }

    #[test]
    fn test_unusable_image_keeps_layout() {
        let html = pane(vec![section(
            "s1",
            1,
            vec![
                ContentItem::Image { value: "javascript:alert(1)".to_string(), caption: None },
                ContentItem::Image { value: "".to_string(), caption: Some("Lost".to_string()) },
                ContentItem::Text { value: "after".to_string() },
            ],
        )])
        .render();

        assert!(!html.contains("javascript:"));
        assert_eq!(html.matches("<figure class=\"figure\">").count(), 2);
        assert!(html.contains("<figcaption>Lost</figcaption>"));
        assert!(html.contains("<p class=\"paragraph\">after</p>"));
    }

    #[test]
    fn test_image_sources() {
        assert!(is_renderable_source("fig1.png"));
        assert!(is_renderable_source("https://example.org/f.png"));
        assert!(is_renderable_source("data:image/png;base64,AAAA"));
        assert!(!is_renderable_source("data:text/html,<b>x</b>"));
        assert!(!is_renderable_source("  JavaScript:alert(1)"));
        assert!(!is_renderable_source("   "));
    }

    #[test]
    fn test_enter_section_is_idempotent() {
        let pane = pane(vec![section("s1", 1, vec![]), section("s2", 2, vec![])]);
        let tracker = ActiveSectionTracker::new();

        assert!(pane.enter_section("s2", &tracker));
        assert!(!pane.enter_section("s2", &tracker));
        assert!(!pane.enter_section("nope", &tracker));
        assert_eq!(tracker.current().as_deref(), Some("s2"));
    }

    #[test]
    fn test_scroll_to() {
        let pane = pane(vec![section("s1", 1, vec![])]);

        assert_eq!(
            pane.scroll_to("s1"),
            Some(ScrollCommand {
                anchor: "s1".to_string(),
                behavior: ScrollBehavior::Smooth,
            })
        );
        assert_eq!(pane.scroll_to("s9"), None);
    }
}
