//! Route modules for Paper Reader

pub mod health;
pub mod reader;
pub mod upload;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(upload::router())
        .nest("/reader", reader::router())
        .nest("/health", health::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
