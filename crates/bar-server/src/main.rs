//! Alchemix bar-server — bar assistant memory layer entry point.
//!
//! Wires the query-construction capability into the application state,
//! attaches the health endpoint, and serves the memory-layer API.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use bar_query::{
    BarQueryConstructor, LlmQueryConstructor, QueryConstructor, TieredConstructor,
};
use bar_server::config::ServerConfig;
use bar_server::routes::{self, health};
use bar_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "bar-server starting");

    // ── Configuration ───────────────────────────────────────────
    // .env first (API keys land there in development), then process env.
    dotenvy::dotenv().ok();
    let config = ServerConfig::from_env()?;

    // ── Query constructor ───────────────────────────────────────
    let constructor = build_constructor(&config)?;
    tracing::info!(tier = constructor.tier_name(), "query constructor initialized");

    // ── Application state (constructor injected, never swapped) ─
    let state = AppState::new(Arc::clone(&constructor));

    // ── Router + health endpoint ────────────────────────────────
    let app = health::attach(routes::build_router(state));

    // ── Listener ────────────────────────────────────────────────
    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "bar-server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the active query constructor: rules always; the LLM fallback only
/// when enabled (and then an API key is required).
fn build_constructor(config: &ServerConfig) -> anyhow::Result<Arc<dyn QueryConstructor>> {
    if !config.llm_fallback_enabled {
        return Ok(Arc::new(BarQueryConstructor::new()));
    }

    tracing::info!(
        api_url = %config.llm.api_url,
        model = %config.llm.model,
        "llm fallback enabled"
    );
    let llm = LlmQueryConstructor::new(config.llm.clone())?;
    Ok(Arc::new(TieredConstructor::new(
        Box::new(BarQueryConstructor::new()),
        Box::new(llm),
    )))
}
