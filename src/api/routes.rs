//! API route configuration.

use crate::api::handlers::{
    create_redirection_handler, delete_redirection_handler, get_redirection_handler,
    list_redirections_handler, update_redirection_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Redirection management routes.
///
/// # Endpoints
///
/// - `GET    /redirections`              - List redirections (optional `shortId`/`longUrl` filters)
/// - `POST   /redirections`              - Register a redirection
/// - `GET    /redirections/{short_id}`   - Fetch one redirection
/// - `PUT    /redirections/{short_id}`   - Change a redirection's target
/// - `DELETE /redirections/{short_id}`   - Remove a redirection
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/redirections",
            get(list_redirections_handler).post(create_redirection_handler),
        )
        .route(
            "/redirections/{short_id}",
            get(get_redirection_handler)
                .put(update_redirection_handler)
                .delete(delete_redirection_handler),
        )
}
