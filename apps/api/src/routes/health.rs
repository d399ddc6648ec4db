use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version and stored record count.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "resume-parser-api",
        "model": state.llm.model(),
        "stored_resumes": state.store.len().await
    }))
}

/// GET /
/// API information and the endpoints it exposes.
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "Resume Parser API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "upload": "POST /api/upload",
            "retrieve": "GET /api/resume/{document_id}"
        }
    }))
}
