//! Upload orchestration

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::document::{Document, StoredDocument};
use crate::navigation::Navigation;
use crate::storage::{DocumentSlot, StorageError};

use super::client::ConversionService;
use super::types::{ConversionError, IngestError, UploadFile};

/// Upload flow with a single busy flag
///
/// Only one conversion runs at a time; a second upload while busy is
/// rejected rather than queued.
pub struct IngestionFlow {
    converter: Arc<dyn ConversionService>,
    slot: Arc<dyn DocumentSlot>,
    accepted_type: String,
    busy: AtomicBool,
}

/// Clears the busy flag when the upload ends, however it ends
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl IngestionFlow {
    pub fn new(
        converter: Arc<dyn ConversionService>,
        slot: Arc<dyn DocumentSlot>,
        accepted_type: impl Into<String>,
    ) -> Self {
        Self {
            converter,
            slot,
            accepted_type: accepted_type.into(),
            busy: AtomicBool::new(false),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Convert `file` and store the result
    ///
    /// On success the slot holds the new document and the caller should
    /// navigate to the reader. On failure the slot is unchanged.
    pub async fn ingest(&self, file: UploadFile) -> Result<Navigation, IngestError> {
        if !file.has_type(&self.accepted_type) {
            tracing::info!(
                file_name = %file.file_name,
                declared_type = ?file.declared_type,
                "Rejected upload with wrong file type"
            );
            return Err(IngestError::WrongFileType {
                declared: file.declared_type,
            });
        }

        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::warn!(file_name = %file.file_name, "Upload rejected, another is in flight");
            return Err(IngestError::UploadInProgress);
        }
        let _busy = BusyGuard(&self.busy);

        let document = match self.convert(&file).await {
            Ok(document) => document,
            Err(e) => {
                tracing::error!(file_name = %file.file_name, "Error uploading file: {}", e);
                return Err(e.into());
            }
        };

        self.store(document).await?;
        Ok(Navigation::Reader)
    }

    async fn convert(&self, file: &UploadFile) -> Result<Document, ConversionError> {
        let value = self.converter.convert(file).await?;
        Ok(Document::from_value(value)?)
    }

    async fn store(&self, document: Document) -> Result<(), IngestError> {
        let title = document.title.clone();
        let sections = document.sections.len();

        let json = StoredDocument::new(document)
            .to_json()
            .map_err(StorageError::from)?;
        self.slot.write(&json).await?;

        tracing::info!(title = %title, sections, "Stored converted document");
        Ok(())
    }
}
