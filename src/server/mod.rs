pub mod routes;

use crate::narration::Narrator;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

/// Shared, read-only handler state. The narrator is injected here and
/// nowhere else.
pub struct AppState {
    pub narrator: Arc<dyn Narrator>,
    pub version: &'static str,
}

impl AppState {
    pub fn new(narrator: Arc<dyn Narrator>) -> Arc<Self> {
        Arc::new(Self {
            narrator,
            version: env!("CARGO_PKG_VERSION"),
        })
    }
}

/// JSON API routes. Static files and CORS are layered on in `main`.
pub fn api_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/interpret", post(routes::interpret))
        .route("/api/facts", post(routes::preview_facts))
        .route("/api/demo/{mode}", get(routes::demo))
        .route("/api/health", get(routes::health))
        .with_state(state)
}
