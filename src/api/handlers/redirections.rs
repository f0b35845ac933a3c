//! Handlers for redirection management endpoints.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::api::dto::redirection::ListQuery;
use crate::domain::entities::{Mapping, MappingCandidate};
use crate::error::AppError;
use crate::state::AppState;

/// Lists registered redirections.
///
/// # Endpoint
///
/// `GET /redirections?shortId=...&longUrl=...`
///
/// Both query parameters are optional equality filters.
pub async fn list_redirections_handler(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Mapping>>, AppError> {
    let mappings = state.registry.find(&query.into_filter()).await?;
    Ok(Json(mappings.collect()))
}

/// Returns a single redirection.
///
/// # Endpoint
///
/// `GET /redirections/{short_id}`
///
/// # Errors
///
/// Returns 404 Not Found if the short id is not registered.
pub async fn get_redirection_handler(
    Path(short_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Mapping>, AppError> {
    let mapping = state.registry.get(&short_id).await?;
    Ok(Json(mapping))
}

/// Registers a new redirection.
///
/// # Endpoint
///
/// `POST /redirections`
///
/// # Request Body
///
/// ```json
/// {
///   "shortId": "docs",                   // optional, derived from longUrl if absent
///   "longUrl": "https://example.com/docs"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the body is not a valid payload, or `longUrl`
/// is missing or malformed.
/// Returns 409 Conflict if the short id or the long URL is already registered.
pub async fn create_redirection_handler(
    State(state): State<AppState>,
    payload: Result<Json<MappingCandidate>, JsonRejection>,
) -> Result<(StatusCode, Json<Mapping>), AppError> {
    let Json(candidate) = payload?;
    let mapping = state.registry.create(candidate).await?;
    Ok((StatusCode::CREATED, Json(mapping)))
}

/// Changes the target of an existing redirection.
///
/// # Endpoint
///
/// `PUT /redirections/{short_id}`
///
/// A `shortId` in the body must match the path; the short id itself is
/// never changed.
///
/// # Errors
///
/// Returns 404 Not Found if the short id is not registered.
/// Returns 400 Bad Request on an invalid body, a missing `longUrl` or a
/// mismatched `shortId`.
/// Returns 409 Conflict if another redirection already targets `longUrl`.
pub async fn update_redirection_handler(
    Path(short_id): Path<String>,
    State(state): State<AppState>,
    payload: Result<Json<MappingCandidate>, JsonRejection>,
) -> Result<Json<Mapping>, AppError> {
    let Json(candidate) = payload?;
    let mapping = state.registry.update(&short_id, candidate).await?;
    Ok(Json(mapping))
}

/// Removes a redirection and returns it.
///
/// # Endpoint
///
/// `DELETE /redirections/{short_id}`
///
/// # Errors
///
/// Returns 404 Not Found if the short id is not registered.
pub async fn delete_redirection_handler(
    Path(short_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Mapping>, AppError> {
    let mapping = state.registry.remove(&short_id).await?;
    Ok(Json(mapping))
}
