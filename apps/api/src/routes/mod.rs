pub mod health;
pub mod matching;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post, put},
    Router,
};

use crate::extraction::handlers::handle_extract_pdf;
use crate::session::handlers;
use crate::state::AppState;

/// Headroom over the upload ceiling for multipart framing, so a slightly
/// oversized file still reaches the friendly size check.
const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health::health_handler))
        // Extraction stub
        .route("/api/extract-pdf", post(handle_extract_pdf))
        // Stateless matching
        .route("/api/v1/match", post(matching::handle_match))
        // Session API
        .route("/api/v1/sessions", post(handlers::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(handlers::handle_get_session).delete(handlers::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/resume",
            put(handlers::handle_set_resume),
        )
        .route("/api/v1/sessions/:id/submit", post(handlers::handle_submit))
        .route(
            "/api/v1/sessions/:id/saved/:job_id",
            post(handlers::handle_toggle_save),
        )
        .route(
            "/api/v1/sessions/:id/view",
            patch(handlers::handle_update_view),
        )
        .route(
            "/api/v1/sessions/:id/upload",
            post(handlers::handle_upload).delete(handlers::handle_remove_upload),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
