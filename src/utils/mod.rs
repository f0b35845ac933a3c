//! Utility functions used across the application:
//!
//! - [`short_id`] - Short id derivation and validation
//! - [`url_validator`] - Long URL validation
//! - [`request_url`] - Absolute request URL reconstruction from HTTP headers

pub mod request_url;
pub mod short_id;
pub mod url_validator;
