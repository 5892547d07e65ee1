//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /shorten`       - Create a short code
//! - `PUT  /update`        - Replace a destination
//! - `PUT  /expiry`        - Reset a code's expiry
//! - `GET  /health`        - Store health check
//! - `GET  /{short_url}`   - Short link redirect
//!
//! Static routes take precedence over the `/{short_url}` capture, so a GET on
//! `/shorten` answers 405 rather than being resolved as a short code.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;

/// Builds the router with all routes and the tracing layer applied.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::routes::mapping_routes())
        .route("/health", get(health_handler))
        .route("/{short_url}", get(redirect_handler))
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application service: [`build_router`] wrapped in trailing
/// slash normalization.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build_router(state))
}
