use std::sync::Arc;

use crate::config::Config;
use crate::enrichment::Entropy;
use crate::matcher_client::JobMatcher;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Remote matcher. Default: `MatcherClient` over HTTP.
    pub matcher: Arc<dyn JobMatcher>,
    /// Clock and random draws for enrichment. Default: `SystemEntropy`.
    pub entropy: Arc<dyn Entropy>,
    pub sessions: SessionStore,
}
