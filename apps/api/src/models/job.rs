use serde::{Deserialize, Serialize};

/// A single ranked candidate as returned by the remote matcher service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawMatch {
    pub job_title: String,
    pub company_name: String,
    /// Similarity in 0.0 – 1.0
    pub score: f64,
    #[serde(default)]
    pub job_description: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum JobType {
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
}

/// A fully populated job listing. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedJob {
    pub id: String,
    pub job_title: String,
    pub company: String,
    pub location: String,
    pub salary: String,
    pub job_type: JobType,
    pub experience: String,
    pub skills: Vec<String>,
    pub description: String,
    pub full_description: String,
    pub match_score: u8, // 0 – 100
    pub match_reasons: Vec<String>,
    pub requirements: Vec<String>,
    pub benefits: Vec<String>,
    pub remote: bool,
    pub posted_date: String, // YYYY-MM-DD
    pub application_url: String,
}

/// Display band for a match score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Excellent,
    Good,
    Fair,
    Low,
}

impl MatchTier {
    pub fn for_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => MatchTier::Excellent,
            60..=79 => MatchTier::Good,
            40..=59 => MatchTier::Fair,
            _ => MatchTier::Low,
        }
    }
}
