//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{any, get, post};
use axum::Router;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{health, payhere, proxy};
use crate::state::AppState;

/// Maximum concurrent requests relayed to the backend.
const PROXY_MAX_CONCURRENT_REQUESTS: usize = 100;

/// Create the service router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Health check
///
/// ## Gateway (signature verification)
/// - `POST /api/payhere/notify` - Payment notifications
///
/// ## Checkout (bearer token)
/// - `POST /api/payhere/checkout-hash` - Hash for the gateway checkout form
///
/// ## Proxy (bearer token, except public catalog `GET`s)
/// - `ANY /api/*path` - Relayed to the backend
pub fn create_router(state: AppState) -> Router {
    let cors_origins = state.config.cors_origins.clone();
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;

    let cors = build_cors_layer(&cors_origins);

    let state = Arc::new(state);

    let proxy_routes = Router::new()
        .route("/api/*path", any(proxy::forward))
        .layer(ConcurrencyLimitLayer::new(PROXY_MAX_CONCURRENT_REQUESTS));

    Router::new()
        .route("/health", get(health::health))
        // Webhooks (no concurrency limit - controlled by the gateway)
        .route("/api/payhere/notify", post(payhere::notify))
        .route(
            "/api/payhere/checkout-hash",
            post(payhere::checkout_hash_handler),
        )
        .merge(proxy_routes)
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
