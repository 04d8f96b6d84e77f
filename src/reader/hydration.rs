//! Hydration gate
//!
//! Loads the stored document on reader entry. Every failure sends the user
//! back to the acquisition view without a message; failures caused by a bad
//! stored value also empty the slot so the next visit starts clean.

use serde_json::Value;
use thiserror::Error;

use crate::document::{Document, DocumentError, StoredDocument, CURRENT_SCHEMA_VERSION};
use crate::storage::{DocumentSlot, StorageError};

#[derive(Debug, Error)]
pub enum HydrationError {
    /// Slot is empty
    #[error("No stored document")]
    NotFound,

    /// Stored value is not JSON
    #[error("Stored document is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Stored value was written under an incompatible schema
    #[error("Stored document uses a stale schema (version {found:?})")]
    StaleSchema { found: Option<u64> },

    /// Current-shaped value that breaks the document invariants
    #[error("Stored document is invalid: {0}")]
    Invalid(#[from] DocumentError),

    /// Slot could not be read
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl HydrationError {
    /// Whether this failure empties the slot
    pub fn clears_storage(&self) -> bool {
        matches!(
            self,
            HydrationError::Parse(_) | HydrationError::StaleSchema { .. } | HydrationError::Invalid(_)
        )
    }

    /// Short machine-readable reason for logs
    pub fn reason(&self) -> &'static str {
        match self {
            HydrationError::NotFound => "not_found",
            HydrationError::Parse(_) => "parse_error",
            HydrationError::StaleSchema { .. } => "stale_schema",
            HydrationError::Invalid(_) => "invalid_document",
            HydrationError::Storage(_) => "storage_error",
        }
    }
}

/// Read, decode and validate the stored document
///
/// On a decode failure the slot is cleared before the error is returned.
pub async fn hydrate(slot: &dyn DocumentSlot) -> Result<Document, HydrationError> {
    let raw = slot.read().await?.ok_or(HydrationError::NotFound)?;

    match decode(&raw) {
        Ok(document) => {
            tracing::debug!(
                title = %document.title,
                sections = document.sections.len(),
                "Document hydrated"
            );
            Ok(document)
        }
        Err(e) => {
            if e.clears_storage() {
                tracing::warn!(reason = e.reason(), error = %e, "Discarding stored document");
                if let Err(clear_err) = slot.clear().await {
                    tracing::error!("Failed to clear document slot: {}", clear_err);
                }
            }
            Err(e)
        }
    }
}

/// Decode a stored value without touching storage
///
/// Accepts the versioned envelope written by the upload flow, and untagged
/// documents as long as they pass the structural staleness probe.
pub fn decode(raw: &str) -> Result<Document, HydrationError> {
    let mut value: Value = serde_json::from_str(raw)?;

    let document = match StoredDocument::version_of(&value) {
        Some(version) if version == CURRENT_SCHEMA_VERSION as u64 => {
            let document = value.get_mut("document").map(Value::take).unwrap_or(Value::Null);
            if StoredDocument::is_stale_untagged(&document) {
                return Err(HydrationError::StaleSchema { found: Some(version) });
            }
            document
        }
        Some(version) => return Err(HydrationError::StaleSchema { found: Some(version) }),
        None if value.get("schemaVersion").is_some() => {
            return Err(HydrationError::StaleSchema { found: None });
        }
        None => {
            if StoredDocument::is_stale_untagged(&value) {
                return Err(HydrationError::StaleSchema { found: None });
            }
            value
        }
    };

    Ok(Document::from_value(document)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{ContentItem, Section, LEGACY_STRING_CONTENT_VERSION};
    use crate::storage::MemorySlot;
    use serde_json::json;

    fn sample_document() -> Document {
        Document {
            title: "Paper X".to_string(),
            sections: vec![
                Section {
                    id: "s1".to_string(),
                    title: "Intro".to_string(),
                    level: 1,
                    content: vec![ContentItem::Text { value: "Hello".to_string() }],
                },
                Section {
                    id: "s2".to_string(),
                    title: "Method".to_string(),
                    level: 2,
                    content: vec![
                        ContentItem::Image {
                            value: "fig1.png".to_string(),
                            caption: Some("Setup".to_string()),
                        },
                        ContentItem::Text { value: "After figure".to_string() },
                    ],
                },
                Section {
                    id: "s3".to_string(),
                    title: "Empty".to_string(),
                    level: 3,
                    content: vec![],
                },
            ],
        }
    }

    #[tokio::test]
    async fn test_roundtrip_through_slot() {
        let document = sample_document();
        let slot = MemorySlot::with_value(StoredDocument::new(document.clone()).to_json().unwrap());

        let hydrated = hydrate(&slot).await.unwrap();
        assert_eq!(hydrated, document);
        // successful hydration leaves the slot alone
        assert!(slot.peek().is_some());
    }

    #[tokio::test]
    async fn test_empty_slot_is_not_found() {
        let slot = MemorySlot::new();
        let err = hydrate(&slot).await.unwrap_err();

        assert!(matches!(err, HydrationError::NotFound));
        assert!(!err.clears_storage());
    }

    #[tokio::test]
    async fn test_garbage_clears_slot() {
        let slot = MemorySlot::with_value("{not json");
        let err = hydrate(&slot).await.unwrap_err();

        assert!(matches!(err, HydrationError::Parse(_)));
        assert_eq!(slot.peek(), None);
    }

    #[tokio::test]
    async fn test_string_content_is_stale() {
        let stale = json!({
            "title": "Old",
            "sections": [{"id": "a", "title": "A", "level": 1, "content": "one big string"}]
        });
        let slot = MemorySlot::with_value(stale.to_string());

        let err = hydrate(&slot).await.unwrap_err();
        assert!(matches!(err, HydrationError::StaleSchema { found: None }));
        assert_eq!(slot.peek(), None);
    }

    #[tokio::test]
    async fn test_old_version_tag_is_stale() {
        let stale = json!({
            "schemaVersion": LEGACY_STRING_CONTENT_VERSION,
            "document": {"title": "Old", "sections": []}
        });
        let slot = MemorySlot::with_value(stale.to_string());

        let err = hydrate(&slot).await.unwrap_err();
        assert!(matches!(err, HydrationError::StaleSchema { found: Some(1) }));
        assert_eq!(slot.peek(), None);
    }

    #[tokio::test]
    async fn test_duplicate_ids_clear_slot() {
        let raw = json!({
            "title": "Dupes",
            "sections": [
                {"id": "x", "title": "A", "level": 1, "content": []},
                {"id": "x", "title": "B", "level": 1, "content": []}
            ]
        });
        let slot = MemorySlot::with_value(raw.to_string());

        let err = hydrate(&slot).await.unwrap_err();
        assert!(matches!(err, HydrationError::Invalid(DocumentError::DuplicateSectionId(_))));
        assert_eq!(slot.peek(), None);
    }

    #[test]
    fn test_untagged_current_shape_accepted() {
        let raw = serde_json::to_string(&sample_document()).unwrap();
        assert_eq!(decode(&raw).unwrap(), sample_document());
    }

    #[test]
    fn test_non_numeric_version_is_stale() {
        let raw = json!({"schemaVersion": "two", "document": {}}).to_string();
        assert!(matches!(
            decode(&raw),
            Err(HydrationError::StaleSchema { found: None })
        ));
    }

    #[tokio::test]
    async fn test_current_envelope_with_string_content_is_stale() {
        let raw = json!({
            "schemaVersion": CURRENT_SCHEMA_VERSION,
            "savedAt": "2026-01-01T00:00:00Z",
            "document": {
                "title": "Mixed",
                "sections": [{"id": "a", "title": "A", "level": 1, "content": "one big string"}]
            }
        });
        let slot = MemorySlot::with_value(raw.to_string());

        let err = hydrate(&slot).await.unwrap_err();
        assert!(matches!(err, HydrationError::StaleSchema { found: Some(2) }));
        assert_eq!(slot.peek(), None);
    }

    #[test]
    fn test_envelope_without_document_is_invalid() {
        let raw = json!({"schemaVersion": CURRENT_SCHEMA_VERSION}).to_string();
        assert!(matches!(decode(&raw), Err(HydrationError::Invalid(_))));
    }
}
