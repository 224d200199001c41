//! Resume upload checks and the manual-extraction stub.
//!
//! No text is ever pulled out of a PDF. A valid upload is answered with guidance
//! on copying the text by hand.

pub mod handlers;

use axum::extract::multipart::{Multipart, MultipartError};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";
pub const UPLOAD_FIELD: &str = "file";

const MANUAL_SUGGESTIONS: [&str; 5] = [
    "Open your PDF in a PDF viewer (Adobe Reader, Chrome, etc.)",
    "Select all text (Ctrl+A or Cmd+A) and copy (Ctrl+C or Cmd+C)",
    "Paste the text in the text area below",
    "Alternatively, use 'Save As Text' from your PDF viewer",
    "Online PDF-to-text converters are also available",
];

/// A file pulled from a multipart body.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// What a session remembers about an accepted upload. The bytes are not kept.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub file_name: String,
    pub file_size: usize,
}

/// Body of the 422 answer from the extraction endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ManualExtractionGuidance {
    pub error: String,
    pub details: String,
    pub suggestions: Vec<String>,
    pub manual_input_recommended: bool,
    pub file_name: String,
    pub file_size: usize,
}

impl ManualExtractionGuidance {
    pub fn for_file(file_name: &str, file_size: usize) -> Self {
        Self {
            error: "PDF text extraction requires manual input".to_string(),
            details: "For the most accurate results, please copy your resume text manually."
                .to_string(),
            suggestions: MANUAL_SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
            manual_input_recommended: true,
            file_name: file_name.to_string(),
            file_size,
        }
    }
}

pub fn is_pdf(content_type: Option<&str>) -> bool {
    content_type
        .map(|ct| {
            ct.split(';')
                .next()
                .unwrap_or_default()
                .trim()
                .eq_ignore_ascii_case(PDF_CONTENT_TYPE)
        })
        .unwrap_or(false)
}

/// Local checks run before a resume upload is accepted into a session.
pub fn validate_upload(
    file: &IncomingFile,
    max_bytes: usize,
    max_label: &str,
) -> Result<UploadedFile, AppError> {
    if !is_pdf(file.content_type.as_deref()) {
        return Err(AppError::UnsupportedMediaType(
            "Please upload a PDF file.".to_string(),
        ));
    }
    if file.data.len() > max_bytes {
        return Err(AppError::PayloadTooLarge(format!(
            "Please upload a PDF file smaller than {max_label}."
        )));
    }
    Ok(UploadedFile {
        file_name: file.file_name.clone(),
        file_size: file.data.len(),
    })
}

/// Reads the first field named `file` from a multipart body.
/// Returns `Ok(None)` when the body carries no such field.
pub async fn read_file_field(
    multipart: &mut Multipart,
) -> Result<Option<IncomingFile>, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("resume.pdf").to_string();
        let content_type = field.content_type().map(String::from);
        let data = field.bytes().await?;
        return Ok(Some(IncomingFile {
            file_name,
            content_type,
            data,
        }));
    }
    Ok(None)
}
