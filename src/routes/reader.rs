//! Reader routes
//!
//! Endpoints:
//! - GET /reader - Hydrate the stored document and render the reader
//! - GET /reader/toc - Outline fragment with the current highlight
//! - POST /reader/toc - TOC entry activated (`{"section": id}`)
//! - POST /reader/sections/enter - Pointer entered a section (`{"section": id}`)
//! - GET /reader/document - Hydrated document as JSON

use std::sync::Arc;

use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::error::{AppError, Result};
use crate::html::reader_page;
use crate::navigation::Navigation;
use crate::reader::{HydrationError, ReaderSession, ScrollCommand};
use crate::state::AppState;

/// Section reference in a request body
///
/// Carried in the body rather than the path so that any id, including the
/// empty string, reaches the handler.
#[derive(Debug, Deserialize)]
pub struct SectionRef {
    pub section: String,
}

#[derive(Debug, Serialize)]
pub struct TocActivation {
    /// `None` when the section has no anchor; nothing changed
    pub scroll: Option<ScrollCommand>,
    pub active: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ActiveSection {
    pub active: Option<String>,
    pub changed: bool,
}

/// Create the reader router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(open_reader))
        .route("/toc", get(toc_fragment).post(activate_toc_entry))
        .route("/sections/enter", post(enter_section))
        .route("/document", get(get_document))
}

/// GET /reader
///
/// Any hydration failure sends the user back to the upload view silently.
async fn open_reader(State(state): State<AppState>) -> Response {
    match ReaderSession::open(state.slot()).await {
        Ok(session) => {
            let session = state.open_session(session);
            tracing::info!(
                title = %session.document().title,
                sections = session.document().sections.len(),
                "Reader opened"
            );
            Html(reader_page(&session)).into_response()
        }
        Err(e) => {
            match &e {
                HydrationError::NotFound => tracing::debug!("No stored document, redirecting"),
                other => tracing::warn!(reason = other.reason(), "Hydration failed, redirecting"),
            }
            state.close_session();
            Redirect::to(Navigation::Acquisition.path()).into_response()
        }
    }
}

/// GET /reader/toc
async fn toc_fragment(State(state): State<AppState>) -> Result<Html<String>> {
    let session = current_session(&state)?;
    Ok(Html(session.render_toc()))
}

/// POST /reader/toc
async fn activate_toc_entry(
    State(state): State<AppState>,
    Json(request): Json<SectionRef>,
) -> Result<Json<TocActivation>> {
    let session = current_session(&state)?;
    let scroll = session.activate_toc_entry(&request.section);

    Ok(Json(TocActivation {
        scroll,
        active: session.active_section(),
    }))
}

/// POST /reader/sections/enter
async fn enter_section(
    State(state): State<AppState>,
    Json(request): Json<SectionRef>,
) -> Result<Json<ActiveSection>> {
    let session = current_session(&state)?;
    let changed = session.enter_section(&request.section);

    Ok(Json(ActiveSection {
        active: session.active_section(),
        changed,
    }))
}

/// GET /reader/document
async fn get_document(State(state): State<AppState>) -> Result<Json<Document>> {
    let session = current_session(&state)?;
    Ok(Json(session.document().clone()))
}

fn current_session(state: &AppState) -> Result<Arc<ReaderSession>> {
    state
        .session()
        .ok_or_else(|| AppError::NotFound("No open reader session".to_string()))
}
