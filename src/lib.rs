//! Paper Reader Library
//!
//! Turns a converted research paper into a navigable reading view: the
//! upload flow stores the converter's output in a single document slot, and
//! the reader hydrates it into a table of contents and a reading pane that
//! share one active-section cell.
//!
//! # Modules
//!
//! - `document`: Document model and persisted envelope
//! - `storage`: Single-slot document store
//! - `reader`: Hydration, active-section tracking, TOC and reading pane
//! - `ingest`: Upload flow and conversion-service client
//! - `routes`: HTTP surface

pub mod config;
pub mod document;
pub mod error;
pub mod html;
pub mod ingest;
pub mod navigation;
pub mod reader;
pub mod routes;
pub mod state;
pub mod storage;
