//! Per-user session state and the transitions a user action can make.
//!
//! Every transition borrows the current state and returns a fresh one.
//! The store swaps the whole value in; nothing is mutated in place.

use std::collections::BTreeSet;

use serde::Serialize;
use uuid::Uuid;

use crate::extraction::UploadedFile;
use crate::models::{EnrichedJob, MatchTier, Notice};
use crate::view::{derive_view, toggle_save, FilterBy, SortBy};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub resume_text: String,
    pub jobs: Vec<EnrichedJob>,
    pub saved_ids: BTreeSet<String>,
    pub sort_by: SortBy,
    pub filter_by: FilterBy,
    pub search_term: String,
    pub uploaded_file: Option<UploadedFile>,
    pub show_manual_instructions: bool,
    /// A match request is in flight.
    pub loading: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejection {
    ResumeRequired,
    AlreadyInFlight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveChange {
    Saved,
    Removed,
}

impl SaveChange {
    pub fn notice(self) -> Notice {
        match self {
            SaveChange::Saved => Notice::info("Job Saved", "Job added to your saved list!"),
            SaveChange::Removed => Notice::info("Job Removed", "Job removed from saved list."),
        }
    }
}

impl SessionState {
    pub fn with_resume_text(&self, resume_text: String) -> Self {
        Self {
            resume_text,
            ..self.clone()
        }
    }

    /// Marks a submission as in flight. Blank resume text or an outstanding
    /// submission rejects the action and leaves the state as it was.
    pub fn begin_submit(&self) -> Result<Self, SubmitRejection> {
        if self.resume_text.trim().is_empty() {
            return Err(SubmitRejection::ResumeRequired);
        }
        if self.loading {
            return Err(SubmitRejection::AlreadyInFlight);
        }
        Ok(Self {
            loading: true,
            ..self.clone()
        })
    }

    /// Replaces the job list. Saved ids are cleared because ids are only
    /// unique within one matcher response.
    pub fn complete_submit(&self, jobs: Vec<EnrichedJob>) -> Self {
        Self {
            jobs,
            saved_ids: BTreeSet::new(),
            loading: false,
            ..self.clone()
        }
    }

    /// Clears the loading flag and keeps the previous job list.
    pub fn fail_submit(&self) -> Self {
        Self {
            loading: false,
            ..self.clone()
        }
    }

    pub fn toggle_save(&self, job_id: &str) -> (Self, SaveChange) {
        let change = if self.saved_ids.contains(job_id) {
            SaveChange::Removed
        } else {
            SaveChange::Saved
        };
        let next = Self {
            saved_ids: toggle_save(&self.saved_ids, job_id),
            ..self.clone()
        };
        (next, change)
    }

    pub fn with_sort(&self, sort_by: SortBy) -> Self {
        Self {
            sort_by,
            ..self.clone()
        }
    }

    pub fn with_filter(&self, filter_by: FilterBy) -> Self {
        Self {
            filter_by,
            ..self.clone()
        }
    }

    pub fn with_search(&self, search_term: String) -> Self {
        Self {
            search_term,
            ..self.clone()
        }
    }

    pub fn with_upload(&self, file: UploadedFile) -> Self {
        Self {
            uploaded_file: Some(file),
            show_manual_instructions: true,
            ..self.clone()
        }
    }

    pub fn without_upload(&self) -> Self {
        Self {
            uploaded_file: None,
            show_manual_instructions: false,
            ..self.clone()
        }
    }

    pub fn has_job(&self, job_id: &str) -> bool {
        self.jobs.iter().any(|j| j.id == job_id)
    }

    /// Recomputes the displayed list from the full current state.
    pub fn view(&self, id: Uuid) -> SessionView {
        let displayed: Vec<DisplayedJob> = derive_view(
            &self.jobs,
            &self.saved_ids,
            self.filter_by,
            &self.search_term,
            self.sort_by,
        )
        .into_iter()
        .map(|job| DisplayedJob {
            saved: self.saved_ids.contains(&job.id),
            match_tier: MatchTier::for_score(job.match_score),
            job: job.clone(),
        })
        .collect();

        SessionView {
            id,
            resume_text: self.resume_text.clone(),
            total_jobs: self.jobs.len(),
            displayed_count: displayed.len(),
            saved_count: self.saved_ids.len(),
            saved_ids: self.saved_ids.iter().cloned().collect(),
            jobs: displayed,
            sort_by: self.sort_by,
            filter_by: self.filter_by,
            search_term: self.search_term.clone(),
            loading: self.loading,
            uploaded_file: self.uploaded_file.clone(),
            show_manual_instructions: self.show_manual_instructions,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayedJob {
    #[serde(flatten)]
    pub job: EnrichedJob,
    pub saved: bool,
    pub match_tier: MatchTier,
}

/// Everything a client needs to render a session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub id: Uuid,
    pub resume_text: String,
    pub jobs: Vec<DisplayedJob>,
    pub total_jobs: usize,
    pub displayed_count: usize,
    pub saved_count: usize,
    pub saved_ids: Vec<String>,
    pub sort_by: SortBy,
    pub filter_by: FilterBy,
    pub search_term: String,
    pub loading: bool,
    pub uploaded_file: Option<UploadedFile>,
    pub show_manual_instructions: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrichment::{enrich_all, FixedEntropy};
    use crate::models::RawMatch;
    use chrono::Utc;

    fn jobs(scores: &[f64]) -> Vec<EnrichedJob> {
        let raws: Vec<RawMatch> = scores
            .iter()
            .enumerate()
            .map(|(i, s)| RawMatch {
                job_title: format!("Role {i}"),
                company_name: format!("Company {i}"),
                score: *s,
                job_description: None,
            })
            .collect();
        let entropy = FixedEntropy {
            now: Utc::now(),
            draw: 0.5,
        };
        enrich_all(&raws, "https://example.com/apply", &entropy)
    }

    #[test]
    fn test_blank_resume_blocks_submission() {
        let state = SessionState::default().with_resume_text("   \n".to_string());
        assert_eq!(state.begin_submit(), Err(SubmitRejection::ResumeRequired));
    }

    #[test]
    fn test_second_submission_is_rejected_while_loading() {
        let state = SessionState::default().with_resume_text("nurse".to_string());
        let loading = state.begin_submit().unwrap();
        assert!(loading.loading);
        assert_eq!(loading.begin_submit(), Err(SubmitRejection::AlreadyInFlight));
    }

    #[test]
    fn test_failed_submission_keeps_previous_jobs() {
        let state = SessionState::default()
            .with_resume_text("nurse".to_string())
            .complete_submit(jobs(&[0.9, 0.5]));
        let after = state.begin_submit().unwrap().fail_submit();
        assert!(!after.loading);
        assert_eq!(after.jobs, state.jobs);
    }

    #[test]
    fn test_completed_submission_replaces_jobs_and_clears_saved() {
        let (state, _) = SessionState::default()
            .with_resume_text("nurse".to_string())
            .complete_submit(jobs(&[0.9, 0.5]))
            .toggle_save("job-1");
        assert_eq!(state.saved_ids.len(), 1);

        let next = state.begin_submit().unwrap().complete_submit(jobs(&[0.3]));
        assert_eq!(next.jobs.len(), 1);
        assert!(next.saved_ids.is_empty());
        assert!(!next.loading);
    }

    #[test]
    fn test_toggle_save_reports_change() {
        let state = SessionState::default().complete_submit(jobs(&[0.9]));
        let (saved, change) = state.toggle_save("job-0");
        assert_eq!(change, SaveChange::Saved);
        let (removed, change) = saved.toggle_save("job-0");
        assert_eq!(change, SaveChange::Removed);
        assert_eq!(removed, state);
    }

    #[test]
    fn test_transitions_leave_original_untouched() {
        let state = SessionState::default();
        let _ = state.with_sort(SortBy::Company);
        let _ = state.with_filter(FilterBy::Remote);
        let _ = state.with_search("nurse".to_string());
        assert_eq!(state, SessionState::default());
    }

    #[test]
    fn test_upload_toggles_manual_instructions() {
        let file = UploadedFile {
            file_name: "cv.pdf".to_string(),
            file_size: 1024,
        };
        let state = SessionState::default().with_upload(file.clone());
        assert_eq!(state.uploaded_file, Some(file));
        assert!(state.show_manual_instructions);

        let cleared = state.without_upload();
        assert!(cleared.uploaded_file.is_none());
        assert!(!cleared.show_manual_instructions);
    }

    #[test]
    fn test_view_reflects_controls_and_saved_flags() {
        let (state, _) = SessionState::default()
            .complete_submit(jobs(&[0.45, 0.9, 0.1]))
            .toggle_save("job-0");
        let view = state.view(Uuid::nil());
        let scores: Vec<u8> = view.jobs.iter().map(|j| j.job.match_score).collect();
        assert_eq!(scores, vec![90, 45, 10]);
        assert_eq!(view.total_jobs, 3);
        assert_eq!(view.saved_count, 1);
        assert!(view.jobs[1].saved);
        assert_eq!(view.jobs[0].match_tier, MatchTier::Excellent);

        let saved_only = state.with_filter(FilterBy::Saved).view(Uuid::nil());
        assert_eq!(saved_only.displayed_count, 1);
        assert_eq!(saved_only.jobs[0].job.id, "job-0");
    }

    #[test]
    fn test_displayed_job_serializes_flat() {
        let state = SessionState::default().complete_submit(jobs(&[0.87]));
        let json = serde_json::to_value(state.view(Uuid::nil())).unwrap();
        let job = &json["jobs"][0];
        assert_eq!(job["id"], "job-0");
        assert_eq!(job["matchScore"], 87);
        assert_eq!(job["matchTier"], "excellent");
        assert_eq!(job["saved"], false);
        assert_eq!(json["sortBy"], "matchScore");
        assert_eq!(json["filterBy"], "all");
    }
}
