// Enrichment Engine
// Heuristic job metadata derived from title, company and description.
// Pure apart from the injected `Entropy`.

pub mod classify;
pub mod engine;
pub mod entropy;
pub mod rules;

pub use engine::enrich_all;
#[cfg(test)]
pub use entropy::FixedEntropy;
pub use entropy::{Entropy, SystemEntropy};
