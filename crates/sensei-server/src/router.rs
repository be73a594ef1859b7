//! Router construction for the sensei-bot server.

use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use sensei_core::ChatService;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;

/// Cross-origin policy: echo the single matching allowed origin (never a
/// wildcard or a joined list), vary by origin, and permit only what the
/// widget needs.
pub fn cors_layer(allowed_origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .vary([header::ORIGIN])
}

/// Build the full axum router with all routes and middleware.
pub fn build_router(service: ChatService, allowed_origins: Vec<HeaderValue>) -> Router {
    Router::new()
        .route("/api/chat", post(handlers::chat))
        .route("/api/health", get(handlers::health))
        .with_state(service)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origins))
}
