//! Ingestion flow
//!
//! Accepts one PDF, sends it to the conversion service, stores the returned
//! document in the slot and hands off to the reader.
//!
//! The conversion service itself is external; this module only speaks its
//! upload contract (multipart form, field `file`, JSON document back).

mod client;
mod flow;
mod types;

pub use client::{ConversionService, HttpConversionClient};
pub use flow::IngestionFlow;
pub use types::{ConversionError, IngestError, UploadFile};
