mod config;
mod errors;
mod generation;
mod letter;
mod llm_client;
mod models;
mod render;
mod routes;
mod state;
mod wizard;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::GeminiClient;
use crate::render::{default_page_config, Renderer};
use crate::routes::build_router;
use crate::state::AppState;
use crate::wizard::store::SessionStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CV Wizard API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let generator = Arc::new(GeminiClient::new(config.gemini_api_key.clone())?);
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Load fonts and page config for the PDF renderer
    let fonts = config.load_fonts()?;
    if fonts.is_empty() {
        info!("No FONT_PATHS configured; PDFs will use Typst's bundled fonts");
    }
    info!(
        "Sessions expire after {}s idle",
        config.session_idle_timeout.as_secs()
    );
    let page_config = default_page_config();
    info!(
        "Renderer page config: {} with {} font file(s)",
        page_config.paper,
        fonts.len()
    );

    // Build app state
    let state = AppState {
        sessions: SessionStore::new(config.session_idle_timeout),
        generator,
        renderer: Renderer::new(page_config, fonts),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS once the frontend origin is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
