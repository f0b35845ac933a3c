//! Data Transfer Objects for API requests and responses.
//!
//! Request and response bodies for mappings reuse
//! [`crate::domain::entities::Mapping`] and
//! [`crate::domain::entities::MappingCandidate`] directly; this module only
//! holds shapes specific to the HTTP surface.

pub mod health;
pub mod redirection;
