use axum::extract::Multipart;
use tracing::info;

use crate::errors::AppError;
use crate::extraction::{is_pdf, read_file_field, ManualExtractionGuidance};

/// POST /api/extract-pdf
///
/// Always a client error: 400 for a missing or non-PDF file, otherwise 422 with
/// manual copy-paste guidance. Malformed multipart bodies become a 500 carrying the cause.
pub async fn handle_extract_pdf(mut multipart: Multipart) -> Result<(), AppError> {
    let file = read_file_field(&mut multipart)
        .await
        .map_err(|e| AppError::ExtractionFailed(e.body_text()))?
        .ok_or_else(|| AppError::Validation("No file provided".to_string()))?;

    if !is_pdf(file.content_type.as_deref()) {
        return Err(AppError::UnsupportedMediaType(
            "File must be a PDF".to_string(),
        ));
    }

    info!(
        "PDF '{}' ({} bytes) received; directing user to manual input",
        file.file_name,
        file.data.len()
    );

    Err(AppError::ManualExtraction(Box::new(
        ManualExtractionGuidance::for_file(&file.file_name, file.data.len()),
    )))
}
