//! Enrichment — turns a ranked matcher candidate into a complete job listing.
//!
//! Every field comes from the rule tables in `rules`, except two: the remote flag
//! fallback and the posted date, which draw from the injected `Entropy`.

use chrono::Duration;
use serde::Serialize;

use crate::enrichment::entropy::Entropy;
use crate::enrichment::rules::{
    first_match, resolve_list, resolve_salary, resolve_skills, JobText, BENEFIT_RULES,
    EXPERIENCE_RULES, JOB_TYPE_RULES, LOCATION_RULES, REQUIREMENT_RULES,
};
use crate::models::{EnrichedJob, JobType, RawMatch};

const SHORT_DESCRIPTION_CHARS: usize = 150;
const POSTED_WINDOW_DAYS: i64 = 30;
/// Non-tech roles are flagged remote when a uniform draw exceeds this.
const REMOTE_DRAW_THRESHOLD: f64 = 0.7;

/// Derived metadata for one job, before it is assembled into an `EnrichedJob`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobDetails {
    pub location: String,
    pub salary: String,
    pub job_type: JobType,
    pub experience: String,
    pub skills: Vec<String>,
    pub short_description: String,
    pub match_reasons: Vec<String>,
    pub requirements: Vec<String>,
    pub benefits: Vec<String>,
    pub remote: bool,
    pub posted_date: String,
}

/// Converts a 0–1 similarity into a 0–100 integer score.
/// Out-of-range and NaN inputs are clamped.
pub fn match_score(score: f64) -> u8 {
    if score.is_nan() {
        return 0;
    }
    (score.clamp(0.0, 1.0) * 100.0).round() as u8
}

/// The description the rules scan. An absent or empty description falls back to
/// a sentence built from title and company; whitespace is kept as given.
pub fn effective_description(job_title: &str, company: &str, description: Option<&str>) -> String {
    match description {
        Some(d) if !d.is_empty() => d.to_string(),
        _ => format!("{job_title} position at {company}"),
    }
}

/// Derives every metadata field for a job. Never fails.
pub fn derive_details(
    job_title: &str,
    company: &str,
    description: &str,
    score: u8,
    entropy: &dyn Entropy,
) -> JobDetails {
    let text = JobText::new(job_title, company, description);

    JobDetails {
        location: first_match(LOCATION_RULES, &text)
            .map(|s| s.to_string())
            .unwrap_or_default(),
        salary: resolve_salary(&text),
        job_type: first_match(JOB_TYPE_RULES, &text)
            .copied()
            .unwrap_or(JobType::FullTime),
        experience: first_match(EXPERIENCE_RULES, &text)
            .map(|s| s.to_string())
            .unwrap_or_default(),
        skills: resolve_skills(&text),
        short_description: short_description(job_title, company, description),
        match_reasons: match_reasons(job_title, company, score),
        requirements: resolve_list(REQUIREMENT_RULES, &text),
        benefits: resolve_list(BENEFIT_RULES, &text),
        remote: text.roles.tech || entropy.unit() > REMOTE_DRAW_THRESHOLD,
        posted_date: posted_date(entropy),
    }
}

/// Builds the full listing for the candidate at `index` in a matcher response.
pub fn enrich(
    index: usize,
    raw: &RawMatch,
    application_base_url: &str,
    entropy: &dyn Entropy,
) -> EnrichedJob {
    let score = match_score(raw.score);
    let description = effective_description(
        &raw.job_title,
        &raw.company_name,
        raw.job_description.as_deref(),
    );
    let details = derive_details(
        &raw.job_title,
        &raw.company_name,
        &description,
        score,
        entropy,
    );

    EnrichedJob {
        id: format!("job-{index}"),
        job_title: raw.job_title.clone(),
        company: raw.company_name.clone(),
        location: details.location,
        salary: details.salary,
        job_type: details.job_type,
        experience: details.experience,
        skills: details.skills,
        description: details.short_description,
        full_description: description,
        match_score: score,
        match_reasons: details.match_reasons,
        requirements: details.requirements,
        benefits: details.benefits,
        remote: details.remote,
        posted_date: details.posted_date,
        application_url: application_url(application_base_url, &raw.company_name),
    }
}

/// Enriches a whole matcher response, preserving its order.
pub fn enrich_all(
    raws: &[RawMatch],
    application_base_url: &str,
    entropy: &dyn Entropy,
) -> Vec<EnrichedJob> {
    raws.iter()
        .enumerate()
        .map(|(i, raw)| enrich(i, raw, application_base_url, entropy))
        .collect()
}

fn match_reasons(job_title: &str, company: &str, score: u8) -> Vec<String> {
    let mut reasons = vec![
        format!("Strong match based on resume analysis ({score}% similarity)"),
        format!("Your skills align well with {job_title} requirements"),
        format!("Good cultural fit for {company}"),
    ];
    if score >= 80 {
        reasons.push("Excellent experience match for this role".to_string());
    } else if score >= 60 {
        reasons.push("Good potential for growth in this position".to_string());
    }
    reasons
}

fn short_description(job_title: &str, company: &str, description: &str) -> String {
    let excerpt: String = description.chars().take(SHORT_DESCRIPTION_CHARS).collect();
    format!("{job_title} position at {company}. {excerpt}...")
}

fn posted_date(entropy: &dyn Entropy) -> String {
    let window_ms = POSTED_WINDOW_DAYS * 24 * 60 * 60 * 1000;
    let offset = Duration::milliseconds((entropy.unit() * window_ms as f64) as i64);
    (entropy.now() - offset).format("%Y-%m-%d").to_string()
}

fn application_url(base_url: &str, company: &str) -> String {
    let slug = company
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");
    format!("{}/{slug}", base_url.trim_end_matches('/'))
}
