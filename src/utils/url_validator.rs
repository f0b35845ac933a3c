//! Long URL validation.
//!
//! Long URLs are stored exactly as submitted: the short id is derived from the
//! raw string, so rewriting it here would change which id a URL maps to.
//! Validation only rejects values that cannot be redirected to.

use url::Url;

/// Reasons a long URL is rejected.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,

    #[error("URL must not contain control characters")]
    ControlCharacter,
}

/// Checks that `input` is an absolute HTTP(S) URL with a host.
///
/// The URL parser drops tabs and newlines, so control characters are rejected
/// on the raw input: the stored string must be usable as a `Location` header.
///
/// # Security
///
/// Rejects schemes such as `javascript:`, `data:` and `file:` that would turn
/// the redirect into something other than navigation.
///
/// # Errors
///
/// Returns [`UrlValidationError::InvalidFormat`] for unparsable or relative input,
/// [`UrlValidationError::UnsupportedProtocol`] for non-HTTP(S) schemes,
/// [`UrlValidationError::MissingHost`] when no host is present and
/// [`UrlValidationError::ControlCharacter`] for embedded control characters.
pub fn validate_long_url(input: &str) -> Result<(), UrlValidationError> {
    if input.chars().any(char::is_control) {
        return Err(UrlValidationError::ControlCharacter);
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(())
}
