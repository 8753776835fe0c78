//! Document text extraction for uploaded PDF and DOCX files.
//!
//! Parsing runs on the blocking pool under a deadline. A panic inside a parser, or a parser
//! that outlives the deadline, is reported as an unreadable file rather than taking the
//! request down with it.

use std::time::Duration;

use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, warn};

mod docx;

#[cfg(test)]
pub(crate) use docx::tests::build_docx;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const DEFAULT_EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Resolves the document kind from the declared content type, falling back to the
    /// filename extension when the client sent no useful type.
    pub fn detect(content_type: Option<&str>, file_name: &str) -> Option<Self> {
        let mime = content_type
            .map(|ct| ct.split(';').next().unwrap_or(ct).trim().to_ascii_lowercase())
            .filter(|ct| !ct.is_empty() && ct != "application/octet-stream");

        match mime.as_deref() {
            Some(PDF_MIME) => Some(DocumentKind::Pdf),
            Some(DOCX_MIME) => Some(DocumentKind::Docx),
            Some(_) => None,
            None => Self::from_extension(file_name),
        }
    }

    fn from_extension(file_name: &str) -> Option<Self> {
        let extension = std::path::Path::new(file_name)
            .extension()
            .and_then(|v| v.to_str())
            .map(|v| v.to_ascii_lowercase())?;
        match extension.as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "docx" => Some(DocumentKind::Docx),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("unsupported file type: {file}")]
    Unsupported { file: String },

    #[error("no text could be extracted from {file}")]
    Empty { file: String },

    #[error("failed to read {file}: {reason}")]
    Unreadable { file: String, reason: String },
}

/// A file received from a multipart upload, in upload order.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl UploadedFile {
    pub fn kind(&self) -> Option<DocumentKind> {
        DocumentKind::detect(self.content_type.as_deref(), &self.file_name)
    }
}

/// Extracts plain text from an uploaded file. Whitespace-only output is `Empty`.
/// Parsing that has not finished within `limit` is `Unreadable`.
pub async fn extract_text(file: &UploadedFile, limit: Duration) -> Result<String, DocumentError> {
    let kind = file.kind().ok_or_else(|| DocumentError::Unsupported {
        file: file.file_name.clone(),
    })?;

    let data = file.data.clone();
    let text = run_parser(&file.file_name, limit, move || match kind {
        DocumentKind::Pdf => pdf_extract::extract_text_from_mem(&data).map_err(|e| e.to_string()),
        DocumentKind::Docx => docx::extract_docx_text(&data).map_err(|e| e.to_string()),
    })
    .await?;

    let text = text.trim().to_string();
    if text.is_empty() {
        return Err(DocumentError::Empty {
            file: file.file_name.clone(),
        });
    }

    debug!(file = %file.file_name, ?kind, chars = text.len(), "extracted document text");
    Ok(text)
}

/// Runs `parse` on the blocking pool. The blocking thread cannot be cancelled, so a parser
/// past its deadline keeps running in the background while the caller moves on.
async fn run_parser<F>(file_name: &str, limit: Duration, parse: F) -> Result<String, DocumentError>
where
    F: FnOnce() -> Result<String, String> + Send + 'static,
{
    let unreadable = |reason: String| DocumentError::Unreadable {
        file: file_name.to_string(),
        reason,
    };

    match tokio::time::timeout(limit, tokio::task::spawn_blocking(parse)).await {
        Ok(Ok(Ok(text))) => Ok(text),
        Ok(Ok(Err(reason))) => Err(unreadable(reason)),
        Ok(Err(join_err)) => Err(unreadable(format!("parser aborted: {join_err}"))),
        Err(_) => {
            warn!(file = file_name, ?limit, "document parsing timed out");
            Err(unreadable(format!("parsing did not finish within {limit:?}")))
        }
    }
}
