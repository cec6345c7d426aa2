use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use checku_api::config::Config;
use checku_api::history::store::{HistoryStore, JsonFileBackend};
use checku_api::llm_client::{self, GeminiClient};
use checku_api::routes::build_router;
use checku_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("checku_api={}", &config.rust_log))),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Check-U API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize Gemini client
    let llm = GeminiClient::new(config.gemini_api_key.clone());
    info!("Gemini client initialized (model: {})", llm_client::MODEL);

    // Initialize history store (one JSON document, whole-sequence rewrites)
    let backend = Arc::new(JsonFileBackend::new(&config.history_path));
    let history = Arc::new(HistoryStore::new(backend));
    info!("History store initialized at {}", config.history_path);

    // Build app state
    let state = AppState {
        llm,
        history,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
