//! Reader session
//!
//! Everything a single reader entry needs: the hydrated document, the two
//! views derived from it, and the shared active-section cell.

use std::sync::Arc;

use crate::document::Document;
use crate::storage::DocumentSlot;

use super::hydration::{hydrate, HydrationError};
use super::pane::{ReadingPane, ScrollCommand};
use super::toc::TableOfContents;
use super::tracker::ActiveSectionTracker;

#[derive(Debug)]
pub struct ReaderSession {
    document: Arc<Document>,
    toc: TableOfContents,
    pane: ReadingPane,
    tracker: ActiveSectionTracker,
}

impl ReaderSession {
    /// Hydrate the stored document and build the reader views
    pub async fn open(slot: &dyn DocumentSlot) -> Result<Self, HydrationError> {
        let document = hydrate(slot).await?;
        Ok(Self::from_document(document))
    }

    pub fn from_document(document: Document) -> Self {
        let document = Arc::new(document);
        Self {
            toc: TableOfContents::from_document(&document),
            pane: ReadingPane::new(Arc::clone(&document)),
            tracker: ActiveSectionTracker::new(),
            document,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn toc(&self) -> &TableOfContents {
        &self.toc
    }

    pub fn pane(&self) -> &ReadingPane {
        &self.pane
    }

    pub fn tracker(&self) -> &ActiveSectionTracker {
        &self.tracker
    }

    pub fn active_section(&self) -> Option<String> {
        self.tracker.current()
    }

    /// TOC entry clicked
    pub fn activate_toc_entry(&self, id: &str) -> Option<ScrollCommand> {
        self.toc.activate(id, &self.pane, &self.tracker)
    }

    /// Pointer entered a section in the reading pane
    pub fn enter_section(&self, id: &str) -> bool {
        self.pane.enter_section(id, &self.tracker)
    }

    /// TOC markup reflecting the current highlight
    pub fn render_toc(&self) -> String {
        self.toc.render(self.tracker.current().as_deref())
    }
}
