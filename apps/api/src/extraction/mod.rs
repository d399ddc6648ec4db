//! Text extraction for uploaded résumé documents.
//!
//! PDF goes through `pdf-extract`; DOCX is read straight out of its OOXML
//! container. Both are CPU-bound, so async callers use `extract_text_blocking`.

mod docx;
mod pdf;

use std::fmt;

use bytes::Bytes;
use thiserror::Error;
use tracing::{info, warn};

#[cfg(test)]
pub(crate) use docx::tests::docx_with_body;

/// Extensions accepted at upload. `.doc` is routed through the DOCX reader.
pub const ALLOWED_EXTENSIONS: [&str; 3] = [".pdf", ".docx", ".doc"];

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file format: {0}. Only PDF and DOCX are supported.")]
    UnsupportedFormat(String),

    #[error("{0} file appears to be empty or contains no extractable text")]
    Empty(&'static str),

    #[error("Could not read document: {0}")]
    Corrupt(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Accepts `pdf`, `.PDF`, `.docx`, ... Anything outside `ALLOWED_EXTENSIONS` is rejected.
    pub fn from_extension(ext: &str) -> Result<Self, ExtractionError> {
        let normalized = ext.trim_start_matches('.').to_ascii_lowercase();
        match normalized.as_str() {
            "pdf" => Ok(DocumentKind::Pdf),
            "docx" | "doc" => Ok(DocumentKind::Docx),
            _ => Err(ExtractionError::UnsupportedFormat(ext.to_string())),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DocumentKind::Pdf => "PDF",
            DocumentKind::Docx => "DOCX",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Extracts and trims the text of a document. Whitespace-only output is an error.
pub fn extract_text(bytes: &[u8], kind: DocumentKind) -> Result<String, ExtractionError> {
    info!("Extracting text from {kind} ({} bytes)", bytes.len());

    let text = match kind {
        DocumentKind::Pdf => pdf::extract(bytes)?,
        DocumentKind::Docx => docx::extract(bytes)?,
    };

    let text = text.trim();
    if text.is_empty() {
        warn!("No text extracted from {kind}");
        return Err(ExtractionError::Empty(kind.label()));
    }

    info!("Successfully extracted {} characters from {kind}", text.len());
    Ok(text.to_string())
}

/// Runs `extract_text` on the blocking pool. A panic inside a document library
/// surfaces as `ExtractionError::Corrupt`.
pub async fn extract_text_blocking(
    bytes: Bytes,
    kind: DocumentKind,
) -> Result<String, ExtractionError> {
    tokio::task::spawn_blocking(move || extract_text(&bytes, kind))
        .await
        .map_err(|e| ExtractionError::Corrupt(format!("{kind} extraction aborted: {e}")))?
}
