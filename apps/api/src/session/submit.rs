//! Submission flow: validate, call the matcher, enrich, swap the job list in.

use tracing::{info, warn};
use uuid::Uuid;

use crate::enrichment::enrich_all;
use crate::errors::{AppError, MATCH_FAILURE_MESSAGE};
use crate::models::{EnrichedJob, Notice};
use crate::session::state::{SessionState, SubmitRejection};
use crate::state::AppState;

pub const RESUME_REQUIRED_MESSAGE: &str = "Please paste your resume text to find matching jobs.";

/// Calls the matcher and enriches its answer. Any matcher failure collapses to
/// `AppError::Matcher`.
pub async fn match_and_enrich(
    state: &AppState,
    text: &str,
    top_n: u32,
) -> Result<Vec<EnrichedJob>, AppError> {
    if text.trim().is_empty() {
        return Err(resume_required());
    }

    let raws = state
        .matcher
        .match_resume(text, top_n)
        .await
        .map_err(|e| {
            AppError::Matcher(e.to_string())
                .with_notice(Notice::destructive("Error", MATCH_FAILURE_MESSAGE))
        })?;

    Ok(enrich_all(
        &raws,
        &state.config.application_base_url,
        state.entropy.as_ref(),
    ))
}

/// Runs a submission for a session. The session is marked loading while the
/// matcher call is outstanding; a second submit in that window gets a 409.
///
/// The matcher call and the closing transition run on their own task, so the
/// session leaves the loading state even if the caller goes away mid-request.
pub async fn submit(state: &AppState, id: Uuid) -> Result<(SessionState, Notice), AppError> {
    let (loading, ()) = state
        .sessions
        .update(id, |s| {
            let next = s.begin_submit().map_err(rejection_error)?;
            Ok((next, ()))
        })
        .await?;

    let task_state = state.clone();
    let resume_text = loading.resume_text;
    tokio::spawn(async move { finish_submit(&task_state, id, &resume_text).await })
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("submission task failed: {e}")))?
}

async fn finish_submit(
    state: &AppState,
    id: Uuid,
    resume_text: &str,
) -> Result<(SessionState, Notice), AppError> {
    let top_n = state.config.matcher_top_n;
    match match_and_enrich(state, resume_text, top_n).await {
        Ok(jobs) => {
            let count = jobs.len();
            info!("Session {id}: matched {count} jobs");
            let (next, ()) = state
                .sessions
                .update(id, |s| Ok((s.complete_submit(jobs), ())))
                .await?;
            Ok((
                next,
                Notice::info(
                    "Jobs Matched!",
                    format!("Found {count} matching opportunities."),
                ),
            ))
        }
        Err(e) => {
            warn!("Session {id}: submission failed: {e}");
            state
                .sessions
                .update(id, |s| Ok((s.fail_submit(), ())))
                .await?;
            Err(e)
        }
    }
}

fn rejection_error(rejection: SubmitRejection) -> AppError {
    match rejection {
        SubmitRejection::ResumeRequired => resume_required(),
        SubmitRejection::AlreadyInFlight => {
            AppError::Conflict("A match request is already in progress.".to_string())
        }
    }
}

fn resume_required() -> AppError {
    AppError::Validation(RESUME_REQUIRED_MESSAGE.to_string())
        .with_notice(Notice::destructive("Resume Required", RESUME_REQUIRED_MESSAGE))
}
