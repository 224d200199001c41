mod config;
mod enrichment;
mod errors;
mod extraction;
mod matcher_client;
mod models;
mod routes;
mod session;
mod state;
mod view;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::enrichment::SystemEntropy;
use crate::matcher_client::MatcherClient;
use crate::routes::build_router;
use crate::session::SessionStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing MATCHER_URL)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Matcher API v{}", env!("CARGO_PKG_VERSION"));

    let matcher = MatcherClient::new(config.matcher_url.clone(), config.matcher_timeout_secs)?;
    info!(
        "Matcher client initialized (endpoint: {}, top_n: {}, timeout: {}s)",
        matcher.endpoint(),
        config.matcher_top_n,
        config.matcher_timeout_secs
    );
    info!("Upload limit: {}", config.max_upload_label());

    let state = AppState {
        config: config.clone(),
        matcher: Arc::new(matcher),
        entropy: Arc::new(SystemEntropy),
        sessions: SessionStore::default(),
    };

    // TODO: restrict CORS origins once the web client's host is fixed
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
