//! Ingestion types

use axum::http::StatusCode;
use thiserror::Error;

use crate::document::DocumentError;
use crate::storage::StorageError;

/// Shown when the selected file is not a PDF
pub const WRONG_FILE_TYPE_MESSAGE: &str = "Please upload a PDF file.";

/// Shown when conversion or storing the result fails
pub const UPLOAD_FAILED_MESSAGE: &str = "Failed to process PDF. Please try again.";

/// Shown when another paper is still being converted
pub const UPLOAD_IN_PROGRESS_MESSAGE: &str =
    "A paper is already being processed. Please wait for it to finish.";

/// Generic binary type some clients send for every file
const OPAQUE_MIME_TYPE: &str = "application/octet-stream";

// ============================================================================
// Upload File
// ============================================================================

/// A file picked or dropped on the acquisition view
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    /// MIME type as reported for the file
    pub declared_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    /// Build from a multipart part
    ///
    /// When the part carries no useful content type, the type is guessed from
    /// the file name the same way browsers fill in `File.type`.
    pub fn new(file_name: impl Into<String>, content_type: Option<&str>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let declared_type = content_type
            .map(str::trim)
            .filter(|ct| !ct.is_empty() && !ct.eq_ignore_ascii_case(OPAQUE_MIME_TYPE))
            .map(str::to_string)
            .or_else(|| {
                mime_guess::from_path(&file_name)
                    .first_raw()
                    .map(str::to_string)
            });

        Self {
            file_name,
            declared_type,
            bytes,
        }
    }

    /// Whether the declared type names `expected` (parameters ignored)
    pub fn has_type(&self, expected: &str) -> bool {
        self.declared_type
            .as_deref()
            .and_then(|ct| ct.split(';').next())
            .map(|essence| essence.trim().eq_ignore_ascii_case(expected))
            .unwrap_or(false)
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Failures talking to the conversion service
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("Conversion request failed: {0}")]
    Transport(String),

    #[error("Conversion service returned {status}")]
    Status { status: u16 },

    #[error("Conversion response is not JSON: {0}")]
    Body(String),

    #[error("Conversion response is not a valid document: {0}")]
    InvalidDocument(#[from] DocumentError),
}

impl From<reqwest::Error> for ConversionError {
    fn from(err: reqwest::Error) -> Self {
        ConversionError::Transport(err.to_string())
    }
}

/// Upload-path errors; all are reported to the user and retryable
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Wrong file type: {declared:?}")]
    WrongFileType { declared: Option<String> },

    #[error("An upload is already in progress")]
    UploadInProgress,

    #[error("Upload failed: {0}")]
    UploadTransportFailure(#[from] ConversionError),

    #[error("Failed to store converted document: {0}")]
    Storage(#[from] StorageError),
}

impl IngestError {
    /// Message for the acquisition view
    pub fn user_message(&self) -> &'static str {
        match self {
            IngestError::WrongFileType { .. } => WRONG_FILE_TYPE_MESSAGE,
            IngestError::UploadInProgress => UPLOAD_IN_PROGRESS_MESSAGE,
            IngestError::UploadTransportFailure(_) | IngestError::Storage(_) => UPLOAD_FAILED_MESSAGE,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            IngestError::WrongFileType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            IngestError::UploadInProgress => StatusCode::CONFLICT,
            IngestError::UploadTransportFailure(_) => StatusCode::BAD_GATEWAY,
            IngestError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
