use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{error, info};

use crate::errors::AppError;
use crate::extraction::{DocumentKind, ALLOWED_EXTENSIONS};

/// An upload whose name passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedUpload {
    /// Lowercased, dot-prefixed extension (".pdf").
    pub extension: String,
    pub kind: DocumentKind,
}

/// Checks the uploaded file name's extension against `ALLOWED_EXTENSIONS`.
pub fn validate_file_name(file_name: &str) -> Result<ValidatedUpload, AppError> {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default();

    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        error!("Invalid file type: {extension:?} ({file_name})");
        return Err(AppError::Validation(format!(
            "Invalid file type. Allowed types: {}",
            ALLOWED_EXTENSIONS.join(", ")
        )));
    }

    let kind = DocumentKind::from_extension(&extension)?;
    Ok(ValidatedUpload { extension, kind })
}

/// Writes the raw upload to `<dir>/<document_id><extension>`, creating `dir` if needed.
pub async fn save_upload(
    dir: &Path,
    document_id: &str,
    extension: &str,
    bytes: &[u8],
) -> Result<PathBuf, AppError> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("creating upload directory {}", dir.display()))?;

    let path = dir.join(format!("{document_id}{extension}"));
    tokio::fs::write(&path, bytes)
        .await
        .with_context(|| format!("writing upload to {}", path.display()))?;

    info!("File saved: {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_allowed_extensions_case_insensitively() {
        let pdf = validate_file_name("Jane_Doe_CV.PDF").unwrap();
        assert_eq!(pdf.extension, ".pdf");
        assert_eq!(pdf.kind, DocumentKind::Pdf);

        let docx = validate_file_name("resume.final.docx").unwrap();
        assert_eq!(docx.extension, ".docx");
        assert_eq!(docx.kind, DocumentKind::Docx);

        let doc = validate_file_name("old.doc").unwrap();
        assert_eq!(doc.kind, DocumentKind::Docx);
    }

    #[test]
    fn test_validate_rejects_other_types_with_allowed_list() {
        for name in ["notes.txt", "resume", "archive.pdf.zip", ".pdf"] {
            match validate_file_name(name) {
                Err(AppError::Validation(msg)) => {
                    assert_eq!(msg, "Invalid file type. Allowed types: .pdf, .docx, .doc")
                }
                other => panic!("{name}: expected validation error, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_save_upload_creates_directory_and_file() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("uploads");

        let path = save_upload(&dir, "abc-123", ".pdf", b"%PDF-1.4").await.unwrap();

        assert_eq!(path, dir.join("abc-123.pdf"));
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.4");
    }
}
