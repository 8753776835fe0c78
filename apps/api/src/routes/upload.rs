use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;

use crate::documents::UploadedFile;
use crate::errors::AppError;

/// Collects every file part of a multipart body, in the order the client sent them.
/// Parts without a filename (plain form fields) are ignored.
pub async fn collect_files(mut multipart: Multipart) -> Result<Vec<UploadedFile>, AppError> {
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("invalid multipart body", e))?
    {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error(&format!("failed to read '{file_name}'"), e))?;

        files.push(UploadedFile {
            file_name,
            content_type,
            data,
        });
    }

    Ok(files)
}

/// Bodies over the configured upload cap surface here as 413; anything else is a bad request.
fn multipart_error(context: &str, err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::Validation(format!("{context}: {err}"))
    }
}
