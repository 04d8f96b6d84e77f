//! Table of contents
//!
//! A flat outline of the document's sections. Hierarchy is shown through
//! indentation proportional to `level` and a guide line for nested entries.

use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::document::Document;

use super::pane::{ReadingPane, ScrollCommand};
use super::tracker::ActiveSectionTracker;

/// Horizontal indentation per level, in pixels
pub const INDENT_STEP_PX: u64 = 16;

/// Vertical guide drawn beside nested entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HierarchyGuide {
    pub offset_px: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    pub id: String,
    pub title: String,
    pub level: u32,
    pub indent_px: u64,
    pub guide: Option<HierarchyGuide>,
}

impl TocEntry {
    fn new(id: &str, title: &str, level: u32) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            level,
            indent_px: indent_for(level),
            guide: guide_for(level),
        }
    }
}

/// Left padding for an entry at `level`
///
/// Computed in `u64` so every `u32` level maps to a distinct, increasing value.
pub fn indent_for(level: u32) -> u64 {
    u64::from(level) * INDENT_STEP_PX
}

fn guide_for(level: u32) -> Option<HierarchyGuide> {
    (level > 1).then(|| HierarchyGuide {
        offset_px: (u64::from(level) - 1) * INDENT_STEP_PX + INDENT_STEP_PX / 2,
    })
}

#[derive(Debug, Clone)]
pub struct TableOfContents {
    title: String,
    entries: Vec<TocEntry>,
}

impl TableOfContents {
    pub fn from_document(document: &Document) -> Self {
        Self {
            title: document.title.clone(),
            entries: document
                .sections
                .iter()
                .map(|section| TocEntry::new(&section.id, &section.title, section.level))
                .collect(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn entries(&self) -> &[TocEntry] {
        &self.entries
    }

    /// User selected the entry for section `id`
    ///
    /// Scrolling and highlighting happen together or not at all: when the
    /// pane has no anchor for `id` the tracker is left untouched.
    pub fn activate(
        &self,
        id: &str,
        pane: &ReadingPane,
        tracker: &ActiveSectionTracker,
    ) -> Option<ScrollCommand> {
        let Some(command) = pane.scroll_to(id) else {
            tracing::warn!(section = %id, "TOC entry has no matching anchor");
            return None;
        };

        tracker.set(id);
        tracing::debug!(section = %id, "TOC entry activated");
        Some(command)
    }

    /// Render the outline, highlighting only the entry whose id is `active`
    pub fn render(&self, active: Option<&str>) -> String {
        let mut html = String::with_capacity(256 + self.entries.len() * 160);
        html.push_str("<ol class=\"toc-entries\">");

        for entry in &self.entries {
            let is_active = active == Some(entry.id.as_str());
            html.push_str("<li class=\"toc-entry\">");

            if let Some(guide) = entry.guide {
                let _ = write!(
                    html,
                    "<span class=\"toc-guide\" style=\"left: {}px\"></span>",
                    guide.offset_px
                );
            }

            let _ = write!(
                html,
                "<button type=\"button\" class=\"toc-link{}\" data-section=\"{}\" \
                 style=\"padding-left: {}px\"{}><span class=\"truncate\">{}</span></button></li>",
                if is_active { " active" } else { "" },
                encode_double_quoted_attribute(&entry.id),
                entry.indent_px,
                if is_active { " aria-current=\"true\"" } else { "" },
                encode_text(&entry.title),
            );
        }

        html.push_str("</ol>");
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Section;
    use std::sync::Arc;

    fn document(levels: &[(&str, &str, u32)]) -> Document {
        Document {
            title: "Paper X".to_string(),
            sections: levels
                .iter()
                .map(|(id, title, level)| Section {
                    id: id.to_string(),
                    title: title.to_string(),
                    level: *level,
                    content: vec![],
                })
                .collect(),
        }
    }

    #[test]
    fn test_indentation_is_strictly_monotonic() {
        for a in 1..8u32 {
            for b in (a + 1)..9u32 {
                assert!(indent_for(a) < indent_for(b), "level {} vs {}", a, b);
            }
        }

        let knee = 1u32 << 28;
        let deep = [knee - 1, knee, knee + 1, u32::MAX - 1, u32::MAX];
        for pair in deep.windows(2) {
            assert!(indent_for(pair[0]) < indent_for(pair[1]), "level {:?}", pair);
        }
        assert_eq!(indent_for(u32::MAX), u64::from(u32::MAX) * 16);
    }

    #[test]
    fn test_guide_for_deep_levels() {
        let guide = guide_for(u32::MAX).unwrap();
        assert_eq!(guide.offset_px, (u64::from(u32::MAX) - 1) * 16 + 8);

        for level in [(1u32 << 28), (1u32 << 28) + 1, u32::MAX - 1] {
            let offset = guide_for(level).unwrap().offset_px;
            assert!(offset < indent_for(level));
        }
    }

    #[test]
    fn test_render_deepest_level() {
        let toc = TableOfContents::from_document(&document(&[("s1", "Deep", u32::MAX)]));
        let html = toc.render(None);

        assert!(html.contains("padding-left: 68719476720px"));
        assert!(html.contains("left: 68719476712px"));
    }

    #[test]
    fn test_guides_only_for_nested_entries() {
        let toc = TableOfContents::from_document(&document(&[
            ("s1", "Intro", 1),
            ("s2", "Method", 2),
            ("s3", "Detail", 3),
        ]));
        let entries = toc.entries();

        assert_eq!(entries[0].guide, None);
        assert_eq!(entries[1].guide, Some(HierarchyGuide { offset_px: 24 }));
        assert_eq!(entries[2].guide, Some(HierarchyGuide { offset_px: 40 }));
        assert_eq!(entries[1].indent_px, 32);
    }

    #[test]
    fn test_two_section_outline() {
        let doc = document(&[("s1", "Intro", 1), ("s2", "Method", 2)]);
        let toc = TableOfContents::from_document(&doc);
        let titles: Vec<&str> = toc.entries().iter().map(|e| e.title.as_str()).collect();

        assert_eq!(toc.title(), "Paper X");
        assert_eq!(titles, vec!["Intro", "Method"]);
        assert!(toc.entries()[1].indent_px > toc.entries()[0].indent_px);
    }

    #[test]
    fn test_activate_scrolls_and_highlights() {
        let doc = Arc::new(document(&[("s1", "Intro", 1), ("s2", "Method", 2)]));
        let toc = TableOfContents::from_document(&doc);
        let pane = ReadingPane::new(doc);
        let tracker = ActiveSectionTracker::new();

        let command = toc.activate("s2", &pane, &tracker).unwrap();

        assert_eq!(command.anchor, "s2");
        assert_eq!(tracker.current().as_deref(), Some("s2"));
    }

    #[test]
    fn test_activate_missing_anchor_changes_nothing() {
        let doc = Arc::new(document(&[("s1", "Intro", 1)]));
        let toc = TableOfContents::from_document(&doc);
        let pane = ReadingPane::new(doc);
        let tracker = ActiveSectionTracker::new();
        tracker.set("s1");

        assert_eq!(toc.activate("ghost", &pane, &tracker), None);
        assert_eq!(tracker.current().as_deref(), Some("s1"));
    }

    #[test]
    fn test_render_highlights_exactly_one_entry() {
        let toc = TableOfContents::from_document(&document(&[
            ("s1", "Intro", 1),
            ("s2", "Method", 2),
            ("s3", "Results", 1),
        ]));

        let html = toc.render(Some("s2"));
        assert_eq!(html.matches("aria-current=\"true\"").count(), 1);
        assert!(html.contains("class=\"toc-link active\" data-section=\"s2\""));
        assert_eq!(html.matches("toc-guide").count(), 1);

        let none = toc.render(None);
        assert!(!none.contains("aria-current"));
    }

    #[test]
    fn test_render_escapes_titles() {
        let toc = TableOfContents::from_document(&document(&[("s1", "A <b> & C", 1)]));
        assert!(toc.render(None).contains("A &lt;b&gt; &amp; C"));
    }
}
