use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::EnrichedJob;
use crate::session::submit::match_and_enrich;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub text: String,
    pub top_n: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub jobs: Vec<EnrichedJob>,
}

/// POST /api/v1/match
///
/// One-shot match without a session: resume text in, enriched jobs out, in matcher order.
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    let top_n = request.top_n.unwrap_or(state.config.matcher_top_n);
    if top_n == 0 {
        return Err(AppError::Validation("top_n must be at least 1".to_string()));
    }
    let jobs = match_and_enrich(&state, &request.text, top_n).await?;
    Ok(Json(MatchResponse { jobs }))
}
