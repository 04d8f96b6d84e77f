//! Page templates
//!
//! Server-rendered views for the acquisition entry point and the reader.
//! Markup fragments for the outline and the sections come from
//! [`crate::reader`]; this module wraps them in full pages.

mod assets;
mod pages;

pub use pages::{acquisition_page, reader_page};
