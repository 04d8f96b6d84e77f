//! Reader subsystem
//!
//! Hydrates the stored document and keeps the table of contents and the
//! reading pane in sync through a shared active-section cell.
//!
//! ```text
//! DocumentSlot --hydrate--> Document
//!                              |
//!              +---------------+---------------+
//!              v                               v
//!       TableOfContents                   ReadingPane
//!         |        ^                           |
//!   click |        | highlight           enter |
//!         v        |                           v
//!         +--> ActiveSectionTracker <----------+
//! ```

mod hydration;
mod pane;
mod session;
mod toc;
mod tracker;

pub use hydration::{decode, hydrate, HydrationError};
pub use pane::{HeadingTier, ReadingPane, ScrollBehavior, ScrollCommand};
pub use session::ReaderSession;
pub use toc::{indent_for, HierarchyGuide, TableOfContents, TocEntry, INDENT_STEP_PX};
pub use tracker::ActiveSectionTracker;
