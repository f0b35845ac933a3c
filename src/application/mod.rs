//! Application layer services implementing business logic.
//!
//! Services consume the [`crate::domain::repositories::MappingStore`] trait
//! and give HTTP handlers and the admin CLI a single entry point for every
//! rule about mappings.
//!
//! # Available Services
//!
//! - [`services::registry::Registry`] - Mapping lookup, registration, update and removal
//! - [`services::redirect_resolver::RedirectResolver`] - Short id resolution with pageview notification

pub mod services;
