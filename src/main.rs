use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use imposter::{
    api, config::ServerConfig, options::HttpOptionsProvider, state::AppState, timers, ws,
};

#[tokio::main]
async fn main() {
    // Load .env file if present (before any env var reads)
    if let Err(e) = dotenvy::dotenv() {
        // Not an error if .env doesn't exist, only log if it's a different issue
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "imposter=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Imposter...");

    let config = ServerConfig::from_env();
    let provider = Arc::new(HttpOptionsProvider::new(config.options_url.clone()));
    let port = config.port;

    let state = Arc::new(AppState::new(config));

    // The only fetch for the lifetime of the process; configuring waits on it
    timers::spawn_options_fetch(state.clone(), provider);

    let app = Router::new()
        .route("/ws", get(ws::ws_handler))
        .route("/api/categories", get(api::list_categories))
        .route("/api/session", get(api::session))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
