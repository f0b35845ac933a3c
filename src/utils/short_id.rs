//! Short id derivation and validation.
//!
//! Short ids derived from a long URL are the first characters of the URL-safe
//! base64 encoding of its SHA-256 digest. The same URL always yields the same
//! id, so registering a URL twice without an explicit id collides on the URL
//! rather than producing a second mapping.

use crate::error::AppError;
use base64::Engine as _;
use serde_json::json;
use sha2::{Digest, Sha256};

/// Length of derived short ids.
pub const DEFAULT_SHORT_ID_LENGTH: usize = 7;

/// Upper bound for caller-supplied short ids.
pub const MAX_SHORT_ID_LENGTH: usize = 64;

/// Derives a short id from `long_url`.
///
/// Hashes the UTF-8 bytes of the URL with SHA-256, encodes the digest with
/// the URL-safe base64 alphabet without padding and keeps the first `length`
/// characters. A `length` above the encoded digest length (43) returns the
/// whole encoding.
///
/// Truncation makes collisions possible. They are not retried here: a
/// colliding id is rejected as a conflict when it is registered.
///
/// # Examples
///
/// ```
/// use url_redirector::utils::short_id::generate;
///
/// let id = generate("http://example.com/", 7);
/// assert_eq!(id.len(), 7);
/// assert_eq!(id, generate("http://example.com/", 7));
/// ```
pub fn generate(long_url: &str, length: usize) -> String {
    let digest = Sha256::digest(long_url.as_bytes());
    let mut encoded = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(digest);
    encoded.truncate(length);
    encoded
}

/// Validates a caller-supplied short id.
///
/// # Rules
///
/// - Non-empty, at most [`MAX_SHORT_ID_LENGTH`] characters
/// - Only ASCII letters, digits, `-` and `_` (the alphabet of derived ids)
///
/// # Errors
///
/// Returns [`AppError::InvalidInput`] if any rule is violated.
pub fn validate_short_id(short_id: &str) -> Result<(), AppError> {
    if short_id.is_empty() || short_id.len() > MAX_SHORT_ID_LENGTH {
        return Err(AppError::invalid_input(
            format!("Redirection ID must be 1-{MAX_SHORT_ID_LENGTH} characters"),
            json!({ "provided_length": short_id.len() }),
        ));
    }

    if !short_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::invalid_input(
            "Redirection ID can only contain letters, digits, hyphens and underscores",
            json!({ "short_id": short_id }),
        ));
    }

    Ok(())
}
