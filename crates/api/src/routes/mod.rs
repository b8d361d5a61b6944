//! API routes
//!
//! Domain-grouped HTTP route handlers.

pub mod logs;
pub mod ops;
pub mod upload;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the complete API router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Operations routes (health - no state beyond uptime)
        .merge(ops::routes())
        // Upload route
        .merge(upload::routes())
        // Listing and streaming routes
        .merge(logs::routes())
        .layer(DefaultBodyLimit::max(state.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
