mod config;
mod errors;
mod llm_client;
mod models;
mod routes;
mod screening;
mod session;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::screening::extraction::PdfTextExtractor;
use crate::screening::suggestions::{LlmSuggester, RuleBasedSuggester, Suggester};
use crate::session::SessionStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
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

    info!("Starting Screener API v{}", env!("CARGO_PKG_VERSION"));

    // Suggester: rules by default, LLM when enabled and keyed
    let suggester: Arc<dyn Suggester> = match config.llm_api_key() {
        Some(key) => {
            let llm = LlmClient::new(key.to_string())?;
            info!("LLM suggestions enabled (model: {})", llm_client::MODEL);
            Arc::new(LlmSuggester(llm))
        }
        None => {
            info!("Using rule-based suggestions");
            Arc::new(RuleBasedSuggester)
        }
    };

    let sessions = SessionStore::new(chrono::Duration::minutes(config.session_ttl_minutes));
    session::spawn_sweeper(
        sessions.clone(),
        Duration::from_secs(config.session_sweep_seconds.max(1)),
    );

    let state = AppState {
        config: config.clone(),
        sessions,
        extractor: Arc::new(PdfTextExtractor),
        suggester,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
