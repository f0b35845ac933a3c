//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /r/{short_id}`   - Redirect to the registered long URL (public)
//! - `GET  /r`              - Rejected with 400, no short id given
//! - `GET  /health`         - Health check: store and analytics
//! - `/redirections*`       - Redirection management (JSON)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Permissive or same-origin, per configuration
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, missing_id_handler, redirect_handler};
use crate::api::middleware::{cors, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `cors_permissive` - when `true`, any origin may call the API
pub fn app_router(state: AppState, cors_permissive: bool) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state, cors_permissive))
}

/// Routes and middleware without path normalization.
pub fn router(state: AppState, cors_permissive: bool) -> Router {
    Router::new()
        .route("/r", get(missing_id_handler))
        .route("/r/{short_id}", get(redirect_handler))
        .route("/health", get(health_handler))
        .merge(api::routes::admin_routes())
        .with_state(state)
        .layer(cors::layer(cors_permissive))
        .layer(tracing::layer())
}
