//! Acquisition routes
//!
//! Endpoints:
//! - GET / - Upload view (leaving the reader discards its session)
//! - POST /upload - Convert a PDF and continue to the reader

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};

use crate::error::{AppError, Result};
use crate::html::acquisition_page;
use crate::ingest::{IngestError, UploadFile};
use crate::state::AppState;

/// Maximum accepted upload size: 100MB
pub const MAX_UPLOAD_SIZE: usize = 100 * 1024 * 1024;

impl IntoResponse for IngestError {
    fn into_response(self) -> Response {
        let page = acquisition_page(Some(self.user_message()), false);
        (self.status_code(), Html(page)).into_response()
    }
}

/// Create the acquisition router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(acquisition))
        .route("/upload", post(upload))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_SIZE))
}

/// GET /
async fn acquisition(State(state): State<AppState>) -> Html<String> {
    state.close_session();
    Html(acquisition_page(None, state.ingestion().is_busy()))
}

/// POST /upload
///
/// Reads the configured file field and runs the ingestion flow. Success
/// redirects to the reader; failures re-render the upload view with a message.
async fn upload(State(state): State<AppState>, multipart: Multipart) -> Result<Response> {
    let file = read_file_field(multipart, &state.config().conversion.field_name).await?;

    tracing::info!(
        file_name = %file.file_name,
        declared_type = ?file.declared_type,
        bytes = file.bytes.len(),
        "Received upload"
    );

    match state.ingestion().ingest(file).await {
        Ok(next) => Ok(Redirect::to(next.path()).into_response()),
        Err(e) => Ok(e.into_response()),
    }
}

async fn read_file_field(mut multipart: Multipart, field_name: &str) -> Result<UploadFile> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::error!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read upload: {}", e))
    })? {
        if field.name() != Some(field_name) {
            continue;
        }

        let file_name = field
            .file_name()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        let content_type = field.content_type().map(|s| s.to_string());

        let data = field.bytes().await.map_err(|e| {
            tracing::error!("Failed to read file data: {}", e);
            AppError::BadRequest(format!("Failed to read file data: {}", e))
        })?;

        return Ok(UploadFile::new(file_name, content_type.as_deref(), data.to_vec()));
    }

    Err(AppError::BadRequest(format!("Missing '{}' field", field_name)))
}
