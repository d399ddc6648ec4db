//! Résumé parsing: document text → LLM → schema-validated `ResumeData`.
//! All LLM calls go through llm_client.

pub mod output_parser;
pub mod prompts;

use bytes::Bytes;
use tracing::{error, info};

use crate::errors::AppError;
use crate::extraction::{extract_text_blocking, DocumentKind};
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::LlmClient;
use crate::models::resume::ResumeData;
use crate::parsing::output_parser::SchemaOutputParser;
use crate::parsing::prompts::{render_resume_prompt, RESUME_PARSE_SYSTEM};

/// Asks the model for a `ResumeData` built from `resume_text`.
pub async fn parse_resume_text(resume_text: &str, llm: &LlmClient) -> Result<ResumeData, AppError> {
    info!("Parsing resume with LLM (model: {})", llm.model());

    let parser = SchemaOutputParser::<ResumeData>::new();
    let prompt = render_resume_prompt(&parser.format_instructions(), resume_text);
    let system = format!("{RESUME_PARSE_SYSTEM} {JSON_ONLY_SYSTEM}");

    let reply = llm
        .call_text(&prompt, &system)
        .await
        .map_err(|e| AppError::Llm(format!("Resume parsing call failed: {e}")))?;

    let data = parser.parse(&reply).map_err(|e| {
        error!("Model reply did not match the resume schema: {e}");
        AppError::Llm(e.to_string())
    })?;

    info!("Resume parsed successfully");
    Ok(data)
}

/// Extracts the document's text, then parses it.
pub async fn parse_resume(
    bytes: Bytes,
    kind: DocumentKind,
    llm: &LlmClient,
) -> Result<ResumeData, AppError> {
    let text = extract_text_blocking(bytes, kind).await?;
    parse_resume_text(&text, llm).await
}
