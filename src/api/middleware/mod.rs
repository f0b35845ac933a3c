//! HTTP middleware for request processing.
//!
//! Provides access logging and CORS.

pub mod cors;
pub mod tracing;
