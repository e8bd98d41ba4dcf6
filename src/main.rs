mod config;
mod errors;
mod facts;
mod narration;
mod server;
mod trade;

use crate::narration::anthropic::AnthropicNarrator;
use crate::narration::Narrator;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    // Structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("compass starting");

    // Load config
    let cfg = match config::AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("config error: {e}");
            std::process::exit(1);
        }
    };

    // Narrator is built once and injected into the handlers
    let narrator: Arc<dyn Narrator> = Arc::new(AnthropicNarrator::new(&cfg));
    tracing::info!(
        narrator = narrator.name(),
        model = %cfg.narration_model,
        timeout_secs = cfg.narration_timeout_secs,
        "narrator ready"
    );

    let index = cfg.static_dir.join("index.html");
    let app = server::api_router(server::AppState::new(narrator))
        .fallback_service(
            tower_http::services::ServeDir::new(&cfg.static_dir)
                .fallback(tower_http::services::ServeFile::new(index)),
        )
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        );

    let addr = format!("0.0.0.0:{}", cfg.server_port);
    tracing::info!(static_dir = %cfg.static_dir.display(), "server listening on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("bind error: {e}");
            std::process::exit(1);
        });

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("server error: {e}");
    }
}
