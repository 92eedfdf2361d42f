pub mod config;
pub mod error;
pub mod rest;
pub mod tool;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use foursquare_client::FoursquareClient;
use llm_client::LlmClient;

pub struct AppState {
    pub llm: LlmClient,
    pub places: FoursquareClient,
    pub model: String,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/", get(|| async { "ok" }))
        // Search execution
        .route("/api/execute", post(rest::execute::api_execute))
        .with_state(state)
        // CORS
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        // Logging layer: method + path + status + latency only
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        )
}
