//! Axum route handlers for the Resume API.

use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::ResumeResponse;
use crate::parsing::parse_resume;
use crate::resumes::upload::{save_upload, validate_file_name};
use crate::state::AppState;

/// Multipart field carrying the résumé file.
const FILE_FIELD: &str = "file";

/// POST /api/upload
///
/// Validates, stores and parses an uploaded résumé. Responds 201 with the parsed record.
pub async fn handle_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ResumeResponse>), AppError> {
    let (file_name, bytes) = read_file_field(multipart).await?;
    info!("Received file upload: {file_name} ({} bytes)", bytes.len());

    let upload = validate_file_name(&file_name)?;
    if bytes.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }

    let document_id = Uuid::new_v4().to_string();
    save_upload(&state.config.upload_dir, &document_id, &upload.extension, &bytes).await?;

    let data = parse_resume(bytes, upload.kind, &state.llm).await?;

    let response = ResumeResponse {
        document_id: document_id.clone(),
        data,
        extracted_at: Utc::now(),
        file_name,
    };
    state.store.save(&document_id, response.clone()).await;

    info!("Resume processed successfully: {document_id}");
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/resume/:document_id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(document_id): Path<String>,
) -> Result<Json<ResumeResponse>, AppError> {
    info!("Retrieving resume: {document_id}");

    let resume = state.store.get(&document_id).await.ok_or_else(|| {
        warn!("Resume not found: {document_id}");
        AppError::NotFound(format!("Resume with ID '{document_id}' not found"))
    })?;

    Ok(Json(resume))
}

/// Returns the original file name and contents of the `file` field; other fields are skipped.
async fn read_file_field(mut multipart: Multipart) -> Result<(String, Bytes), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Malformed multipart body", e))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field
            .file_name()
            .filter(|name| !name.trim().is_empty())
            .map(str::to_string)
            .ok_or_else(|| AppError::Validation("Uploaded file has no filename".to_string()))?;

        let bytes = field
            .bytes()
            .await
            .map_err(|e| multipart_error("Failed to read uploaded file", e))?;

        return Ok((file_name, bytes));
    }

    Err(AppError::Validation(format!(
        "Missing multipart field '{FILE_FIELD}'"
    )))
}

fn multipart_error(context: &str, err: MultipartError) -> AppError {
    let message = format!("{context}: {}", err.body_text());
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(message)
    } else {
        AppError::Validation(message)
    }
}
