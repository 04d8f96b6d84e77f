//! Structured document model
//!
//! The in-memory shape of one converted paper, plus the envelope used to
//! persist it between the acquisition view and the reader.
//!
//! ```text
//! Document
//!   title
//!   sections[]            (canonical reading order)
//!     id, title, level    (level 1 = top-level)
//!     content[]           (rendering order)
//!       Text  { value }
//!       Image { value, caption? }
//! ```

mod error;
mod schema;
mod types;

pub use error::{DocumentError, Result};
pub use schema::{StoredDocument, CURRENT_SCHEMA_VERSION, LEGACY_STRING_CONTENT_VERSION};
pub use types::{ContentItem, Document, Section};
