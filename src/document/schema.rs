//! Persisted document envelope
//!
//! Every stored document is tagged with the schema version it was written
//! under, so a reader built against a newer shape can reject older values
//! instead of rendering them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::types::Document;

/// Layout written by the current build
pub const CURRENT_SCHEMA_VERSION: u32 = 2;

/// Retired layout where `section.content` was a single string
pub const LEGACY_STRING_CONTENT_VERSION: u32 = 1;

/// Envelope stored in the document slot
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredDocument {
    pub schema_version: u32,
    pub saved_at: DateTime<Utc>,
    pub document: Document,
}

impl StoredDocument {
    /// Wrap a document under the current schema version
    pub fn new(document: Document) -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            saved_at: Utc::now(),
            document,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Schema version tag of a stored value, if it carries one
    pub fn version_of(value: &Value) -> Option<u64> {
        value.get("schemaVersion").and_then(Value::as_u64)
    }

    /// Structural probe on the section layout
    ///
    /// A document value is stale when it has at least one section and the
    /// first section's `content` is not a list. Applied to untagged values
    /// and to the body of current envelopes.
    pub fn is_stale_untagged(value: &Value) -> bool {
        match value.get("sections").and_then(Value::as_array) {
            Some(sections) => match sections.first() {
                Some(first) => !first.get("content").map(Value::is_array).unwrap_or(false),
                None => false,
            },
            None => false,
        }
    }
}
