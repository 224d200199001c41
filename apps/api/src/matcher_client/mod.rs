/// Matcher Client — the only module that talks to the remote matching service.
///
/// One POST per submission. No retries: any failure is final for that request
/// and surfaces to the caller as a single generic error.
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::RawMatch;

#[derive(Debug, Error)]
pub enum MatcherError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Matcher returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed matcher response: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
struct MatchRequest<'a> {
    text: &'a str,
    top_n: u32,
}

/// The matching backend. Carried in `AppState` as `Arc<dyn JobMatcher>` so tests
/// can substitute a canned responder.
#[async_trait]
pub trait JobMatcher: Send + Sync {
    async fn match_resume(&self, text: &str, top_n: u32) -> Result<Vec<RawMatch>, MatcherError>;
}

/// HTTP implementation against the configured matcher endpoint.
#[derive(Clone)]
pub struct MatcherClient {
    client: Client,
    endpoint: String,
}

impl MatcherClient {
    pub fn new(endpoint: String, timeout_secs: u64) -> Result<Self, MatcherError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl JobMatcher for MatcherClient {
    async fn match_resume(&self, text: &str, top_n: u32) -> Result<Vec<RawMatch>, MatcherError> {
        info!(
            "Requesting top {} matches for resume of {} chars",
            top_n,
            text.chars().count()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("content-type", "application/json")
            .json(&MatchRequest { text, top_n })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Matcher returned {}: {}", status, body);
            return Err(MatcherError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let matches = parse_matches(&body)?;
        debug!("Matcher returned {} candidates", matches.len());
        Ok(matches)
    }
}

fn parse_matches(body: &str) -> Result<Vec<RawMatch>, MatcherError> {
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    /// Serves a throwaway matcher on an ephemeral port and returns its base URL.
    async fn spawn_matcher() -> String {
        // Echoes the request back as a single candidate so the body shape is visible.
        async fn echo(Json(body): Json<Value>) -> Json<Value> {
            Json(json!([{
                "job_title": body["text"],
                "company_name": "Echo Ltd",
                "score": body["top_n"].as_f64().unwrap_or_default() / 100.0,
            }]))
        }
        async fn offline() -> (StatusCode, &'static str) {
            (StatusCode::SERVICE_UNAVAILABLE, "matcher offline")
        }

        let app = Router::new()
            .route("/match", post(echo))
            .route("/down", post(offline));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_posts_json_and_parses_candidates() {
        let base = spawn_matcher().await;
        let client = MatcherClient::new(format!("{base}/match"), 5).unwrap();

        let matches = client.match_resume("Staff nurse, RGN", 25).await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].job_title, "Staff nurse, RGN");
        assert_eq!(matches[0].company_name, "Echo Ltd");
        assert!((matches[0].score - 0.25).abs() < f64::EPSILON);
        assert!(matches[0].job_description.is_none());
    }

    #[tokio::test]
    async fn test_non_success_status_is_reported() {
        let base = spawn_matcher().await;
        let client = MatcherClient::new(format!("{base}/down"), 5).unwrap();

        let err = client.match_resume("anything", 10).await.unwrap_err();
        match err {
            MatcherError::Status { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "matcher offline");
            }
            other => panic!("expected a status error, got {other:?}"),
        }
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(MatchRequest {
            text: "Registered nurse, 6 years",
            top_n: 10,
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"text": "Registered nurse, 6 years", "top_n": 10})
        );
    }

    #[test]
    fn test_parse_matches_with_and_without_description() {
        let body = r#"[
            {"job_title": "Staff Nurse", "company_name": "CarePlus", "score": 0.87,
             "job_description": "RGN role, £18.50 per hour"},
            {"job_title": "Developer", "company_name": "Acme", "score": 0.42}
        ]"#;
        let matches = parse_matches(body).unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].company_name, "CarePlus");
        assert!(matches[1].job_description.is_none());
    }

    #[test]
    fn test_parse_matches_rejects_non_array() {
        let err = parse_matches(r#"{"detail": "boom"}"#).unwrap_err();
        assert!(matches!(err, MatcherError::Parse(_)));
    }

    #[test]
    fn test_client_keeps_endpoint() {
        let client = MatcherClient::new("http://localhost:9/match".to_string(), 5).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:9/match");
    }
}
