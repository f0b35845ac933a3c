//! Reconstruction of the fully-qualified URL of an incoming request.

use axum::http::{HeaderMap, Uri, header};

/// Host assumed when the request carries no usable `Host` header.
const FALLBACK_HOST: &str = "localhost";

/// Rebuilds the absolute URL the client requested.
///
/// - Scheme comes from `X-Forwarded-Proto` when a proxy sets it, otherwise `http`
/// - Host comes from the `Host` header (port preserved), falling back to `localhost`
/// - Path and query come from the request URI
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "s.example.com".parse().unwrap());
///
/// let url = request_url(&headers, &"/r/abc".parse().unwrap());
/// assert_eq!(url, "http://s.example.com/r/abc");
/// ```
pub fn request_url(headers: &HeaderMap, uri: &Uri) -> String {
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split(',').next().unwrap_or(v).trim())
        .filter(|v| *v == "http" || *v == "https")
        .unwrap_or("http");

    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .or_else(|| uri.authority().map(|a| a.as_str()))
        .unwrap_or(FALLBACK_HOST);

    let path_and_query = uri.path_and_query().map(|p| p.as_str()).unwrap_or("/");

    format!("{scheme}://{host}{path_and_query}")
}

/// Returns a header value as an owned string, if present and valid UTF-8.
pub fn header_string(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
