//! Core document types
//!
//! Mirrors the JSON produced by the conversion service:
//! `{ title, sections: [{ id, title, level, content: [{ type, value, caption? }] }] }`

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::error::{DocumentError, Result};

/// A converted paper
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Display title
    pub title: String,
    /// Sections in reading order
    pub sections: Vec<Section>,
}

/// A titled, leveled unit of a document
///
/// Nesting is implied by consecutive `level` values; there are no parent links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Anchor key, unique within the document
    pub id: String,
    pub title: String,
    /// 1 = top-level
    pub level: u32,
    /// Content in rendering order; may be empty
    pub content: Vec<ContentItem>,
}

/// A paragraph or figure within a section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentItem {
    /// Prose, rendered verbatim
    Text { value: String },
    /// Figure reference (URL or data URI)
    Image {
        value: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
    },
}

impl Document {
    /// Decode a document from a JSON value and check its invariants
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let document: Document = serde_json::from_value(value)?;
        document.validate()?;
        Ok(document)
    }

    /// Check title, level and id-uniqueness invariants
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(DocumentError::EmptyTitle);
        }

        let mut seen = HashSet::with_capacity(self.sections.len());
        for section in &self.sections {
            if section.level < 1 {
                return Err(DocumentError::InvalidLevel {
                    id: section.id.clone(),
                    level: section.level,
                });
            }
            if !seen.insert(section.id.as_str()) {
                return Err(DocumentError::DuplicateSectionId(section.id.clone()));
            }
        }

        Ok(())
    }
}
