use super::ExtractionError;

/// Concatenated text of every page.
pub(super) fn extract(bytes: &[u8]) -> Result<String, ExtractionError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractionError::Corrupt(e.to_string()))
}
