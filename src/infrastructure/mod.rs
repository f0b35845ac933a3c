//! Infrastructure layer for external integrations.
//!
//! # Modules
//!
//! - [`analytics`] - Pageview notification (HTTP collector and no-op implementations)
//! - [`persistence`] - Mapping store implementations (PostgreSQL and in-memory)

pub mod analytics;
pub mod persistence;
