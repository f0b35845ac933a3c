//! Cross-origin resource sharing.

use axum::http::Method;
use tower_http::cors::CorsLayer;

/// Creates the CORS layer.
///
/// When `permissive` is set any origin may call every endpoint, which lets
/// browser-based admin tools hosted elsewhere manage redirections. Otherwise
/// only same-origin requests are served, with preflights answered for the
/// methods the API exposes.
pub fn layer(permissive: bool) -> CorsLayer {
    if permissive {
        CorsLayer::permissive()
    } else {
        CorsLayer::new().allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
    }
}
