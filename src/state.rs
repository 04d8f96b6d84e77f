//! Application state management

use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::Config;
use crate::ingest::{ConversionError, ConversionService, HttpConversionClient, IngestionFlow};
use crate::reader::ReaderSession;
use crate::storage::{DocumentSlot, FileSlot};

/// Error type for state initialization
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("Failed to initialize conversion client: {0}")]
    ConversionClient(#[from] ConversionError),
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    slot: Arc<dyn DocumentSlot>,
    ingestion: IngestionFlow,
    /// Reader session for the current visit to `/reader`
    session: RwLock<Option<Arc<ReaderSession>>>,
}

impl AppState {
    /// Create state with explicit storage and converter
    pub fn new(
        config: Config,
        slot: Arc<dyn DocumentSlot>,
        converter: Arc<dyn ConversionService>,
    ) -> Self {
        let ingestion = IngestionFlow::new(
            converter,
            Arc::clone(&slot),
            config.conversion.accepted_type.clone(),
        );

        Self {
            inner: Arc::new(AppStateInner {
                config,
                slot,
                ingestion,
                session: RwLock::new(None),
            }),
        }
    }

    /// Create state backed by the file slot and HTTP converter named in `config`
    pub fn from_config(config: Config) -> Result<Self, StateError> {
        let slot = Arc::new(FileSlot::new(&config.storage.dir, &config.storage.key));
        let converter = Arc::new(HttpConversionClient::new(&config.conversion)?);

        tracing::info!(path = %slot.path().display(), "Document slot ready");
        tracing::info!(endpoint = %converter.endpoint(), "Conversion client ready");

        Ok(Self::new(config, slot, converter))
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the document slot
    pub fn slot(&self) -> &dyn DocumentSlot {
        self.inner.slot.as_ref()
    }

    /// Get the upload flow
    pub fn ingestion(&self) -> &IngestionFlow {
        &self.inner.ingestion
    }

    /// Current reader session, if the reader is open
    pub fn session(&self) -> Option<Arc<ReaderSession>> {
        self.inner.session.read().clone()
    }

    /// Install a freshly hydrated session, replacing any previous one
    pub fn open_session(&self, session: ReaderSession) -> Arc<ReaderSession> {
        let session = Arc::new(session);
        *self.inner.session.write() = Some(Arc::clone(&session));
        session
    }

    /// Drop the reader session when leaving the reader
    pub fn close_session(&self) {
        if self.inner.session.write().take().is_some() {
            tracing::debug!("Reader session closed");
        }
    }
}
