//! Domain layer containing the mapping entity, the store contract, and the
//! pageview event model.
//!
//! - [`entities`] - [`entities::Mapping`] and its create/update shapes
//! - [`repositories`] - the [`repositories::MappingStore`] trait and filters
//! - [`pageview_event`] - analytics event emitted on redirect
//!
//! The domain layer has no dependency on infrastructure or the HTTP layer.
//! Invariant enforcement lives in [`crate::application::services::Registry`].

pub mod entities;
pub mod pageview_event;
pub mod repositories;
