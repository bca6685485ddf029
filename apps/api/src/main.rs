mod config;
mod errors;
mod generation;
mod llm_client;
mod notion;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::notion::NotionClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let crate_target = env!("CARGO_PKG_NAME").replace('-', "_");
            EnvFilter::new(format!("{}={}", crate_target, &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting UX Generative API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the model client
    let llm = LlmClient::new(config.openai_api_key.clone());
    info!("Model client initialized (model: {})", llm_client::MODEL);

    // Initialize the document-store client
    let notion = NotionClient::new();
    info!("Notion client initialized");

    // Build app state
    let state = AppState {
        llm: Arc::new(llm),
        notion,
        config: config.clone(),
    };

    // Build router. CORS stays fully open: the browser form is served from
    // another origin and the API carries no cookies or sessions.
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
