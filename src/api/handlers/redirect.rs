//! Handlers for the public redirect endpoint.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode, Uri, header},
    response::IntoResponse,
};
use serde_json::json;

use crate::domain::pageview_event::PageviewContext;
use crate::error::{AppError, MSG_ID_MISSING};
use crate::state::AppState;
use crate::utils::request_url::{header_string, request_url};

/// Redirects a short id to its registered long URL.
///
/// # Endpoint
///
/// `GET /r/{short_id}`
///
/// # Request Flow
///
/// 1. Rebuild the fully-qualified request URL from `Host` and `X-Forwarded-Proto`
/// 2. Resolve the short id through [`crate::application::services::RedirectResolver`]
/// 3. Pageview is reported to analytics on a detached task
/// 4. Return 302 Found with `Referrer-Policy: no-referrer`
///
/// # Errors
///
/// Returns 400 Bad Request if the short id is blank.
/// Returns 404 Not Found if the short id is not registered.
pub async fn redirect_handler(
    Path(short_id): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
) -> Result<impl IntoResponse, AppError> {
    let context = PageviewContext {
        url: request_url(&headers, &uri),
        user_agent: header_string(&headers, header::USER_AGENT),
        referrer: header_string(&headers, header::REFERER),
    };

    let long_url = state.resolver.resolve(&short_id, context).await?;

    Ok((
        StatusCode::FOUND,
        [
            (header::LOCATION, long_url),
            (header::REFERRER_POLICY, "no-referrer".to_string()),
        ],
    ))
}

/// Rejects a redirect request that carries no short id.
///
/// # Endpoint
///
/// `GET /r`
pub async fn missing_id_handler() -> AppError {
    AppError::invalid_input(MSG_ID_MISSING, json!({}))
}
