//! Result view-model: filter, search and sort over the enriched job list.
//!
//! Always recomputed from the full current state; nothing is patched incrementally.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::models::EnrichedJob;
use crate::view::collate::collate;
use crate::view::controls::{FilterBy, SortBy};

/// Derives the ordered subset of `jobs` to display.
pub fn derive_view<'a>(
    jobs: &'a [EnrichedJob],
    saved_ids: &BTreeSet<String>,
    filter_by: FilterBy,
    search_term: &str,
    sort_by: SortBy,
) -> Vec<&'a EnrichedJob> {
    let needle = search_term.to_lowercase();

    let mut view: Vec<&EnrichedJob> = jobs
        .iter()
        .filter(|job| passes_filter(job, saved_ids, filter_by))
        .filter(|job| matches_search(job, &needle))
        .collect();

    // `sort_by` is stable, so equal keys keep their response order.
    match sort_by {
        SortBy::MatchScore => view.sort_by(|a, b| b.match_score.cmp(&a.match_score)),
        SortBy::Company => view.sort_by(|a, b| collate(&a.company, &b.company)),
        SortBy::JobTitle => view.sort_by(|a, b| collate(&a.job_title, &b.job_title)),
        SortBy::PostedDate => view.sort_by(|a, b| newest_first(&a.posted_date, &b.posted_date)),
        SortBy::Unsorted => {}
    }

    view
}

/// Adds `job_id` when absent, removes it when present.
pub fn toggle_save(saved_ids: &BTreeSet<String>, job_id: &str) -> BTreeSet<String> {
    let mut next = saved_ids.clone();
    if !next.remove(job_id) {
        next.insert(job_id.to_string());
    }
    next
}

fn passes_filter(job: &EnrichedJob, saved_ids: &BTreeSet<String>, filter_by: FilterBy) -> bool {
    match filter_by {
        FilterBy::Saved => saved_ids.contains(&job.id),
        FilterBy::Remote => job.remote,
        FilterBy::Onsite => !job.remote,
        FilterBy::All => true,
    }
}

/// `needle` must already be lower-cased.
fn matches_search(job: &EnrichedJob, needle: &str) -> bool {
    needle.is_empty()
        || job.job_title.to_lowercase().contains(needle)
        || job.company.to_lowercase().contains(needle)
        || job
            .skills
            .iter()
            .any(|skill| skill.to_lowercase().contains(needle))
}

/// Unparseable dates sort after every valid one.
fn newest_first(a: &str, b: &str) -> Ordering {
    let parse = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok();
    match (parse(a), parse(b)) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
