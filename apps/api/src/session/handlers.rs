//! Axum route handlers for the Session API.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::{read_file_field, validate_upload};
use crate::models::Notice;
use crate::session::state::SessionView;
use crate::session::submit::submit;
use crate::state::AppState;
use crate::view::{FilterBy, SortBy};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeTextRequest {
    pub resume_text: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewControlsRequest {
    pub sort_by: Option<SortBy>,
    pub filter_by: Option<FilterBy>,
    pub search_term: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub session: SessionView,
    pub notices: Vec<Notice>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionView>) {
    let (id, session) = state.sessions.create().await;
    (StatusCode::CREATED, Json(session.view(id)))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let session = state.sessions.get(id).await?;
    Ok(Json(session.view(id)))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/sessions/:id/resume
pub async fn handle_set_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ResumeTextRequest>,
) -> Result<Json<SessionView>, AppError> {
    let (session, ()) = state
        .sessions
        .update(id, |s| Ok((s.with_resume_text(request.resume_text), ())))
        .await?;
    Ok(Json(session.view(id)))
}

/// POST /api/v1/sessions/:id/submit
///
/// Sends the session's resume text to the matcher and replaces the job list.
/// Blank text is rejected before any network call.
pub async fn handle_submit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ActionResponse>, AppError> {
    let (session, notice) = submit(&state, id).await?;
    Ok(Json(ActionResponse {
        session: session.view(id),
        notices: vec![notice],
    }))
}

/// POST /api/v1/sessions/:id/saved/:job_id
pub async fn handle_toggle_save(
    State(state): State<AppState>,
    Path((id, job_id)): Path<(Uuid, String)>,
) -> Result<Json<ActionResponse>, AppError> {
    let (session, change) = state
        .sessions
        .update(id, |s| {
            if !s.has_job(&job_id) {
                return Err(AppError::NotFound(format!("Job {job_id} not found")));
            }
            Ok(s.toggle_save(&job_id))
        })
        .await?;
    Ok(Json(ActionResponse {
        session: session.view(id),
        notices: vec![change.notice()],
    }))
}

/// PATCH /api/v1/sessions/:id/view
///
/// Any combination of sort, filter and search may be changed in one call.
pub async fn handle_update_view(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ViewControlsRequest>,
) -> Result<Json<SessionView>, AppError> {
    let (session, ()) = state
        .sessions
        .update(id, |s| {
            let mut next = s.clone();
            if let Some(sort_by) = request.sort_by {
                next = next.with_sort(sort_by);
            }
            if let Some(filter_by) = request.filter_by {
                next = next.with_filter(filter_by);
            }
            if let Some(search_term) = request.search_term {
                next = next.with_search(search_term);
            }
            Ok((next, ()))
        })
        .await?;
    Ok(Json(session.view(id)))
}

/// POST /api/v1/sessions/:id/upload
///
/// Checks the file locally and records it. The PDF is never parsed; the
/// response tells the user to paste the text instead.
pub async fn handle_upload(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<ActionResponse>, AppError> {
    // Fail fast on unknown sessions before reading the body.
    state.sessions.get(id).await?;

    let max_label = state.config.max_upload_label();
    let file = read_file_field(&mut multipart)
        .await
        .map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                AppError::PayloadTooLarge(format!(
                    "Please upload a PDF file smaller than {max_label}."
                ))
            } else {
                AppError::Validation(e.body_text())
            }
        })
        .map_err(upload_notice)?
        .ok_or_else(|| AppError::Validation("No file provided".to_string()))?;

    let uploaded = validate_upload(&file, state.config.max_upload_bytes, &max_label)
        .map_err(upload_notice)?;

    let (session, ()) = state
        .sessions
        .update(id, |s| Ok((s.with_upload(uploaded), ())))
        .await?;

    Ok(Json(ActionResponse {
        session: session.view(id),
        notices: vec![
            Notice::info(
                "PDF Uploaded Successfully",
                "Please follow the manual text extraction steps below for best results.",
            ),
            Notice::info(
                "Manual Copy-Paste Recommended",
                "Open your PDF, select all text (Ctrl+A), copy (Ctrl+C), \
                 and paste in the text area.",
            ),
        ],
    }))
}

/// Attaches the user-facing notice for a rejected upload.
fn upload_notice(error: AppError) -> AppError {
    let notice = match &error {
        AppError::UnsupportedMediaType(msg) => {
            Notice::destructive("Invalid File Type", msg.clone())
        }
        AppError::PayloadTooLarge(msg) => Notice::destructive("File Too Large", msg.clone()),
        _ => return error,
    };
    error.with_notice(notice)
}

/// DELETE /api/v1/sessions/:id/upload
pub async fn handle_remove_upload(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let (session, ()) = state
        .sessions
        .update(id, |s| Ok((s.without_upload(), ())))
        .await?;
    Ok(Json(session.view(id)))
}
