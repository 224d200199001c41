// Result View-Model Pipeline
// Filter → search → sort over enriched jobs, plus the save toggle.

pub mod collate;
pub mod controls;
pub mod pipeline;

pub use controls::{FilterBy, SortBy};
pub use pipeline::{derive_view, toggle_save};
