pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::resumes::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let max_upload_bytes = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        // Resume API
        .route("/api/upload", post(handlers::handle_upload))
        .route("/api/resume/:document_id", get(handlers::handle_get_resume))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}
