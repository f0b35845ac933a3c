//! Store trait definitions for the domain layer.
//!
//! The [`MappingStore`] trait abstracts persistence of mappings. Concrete
//! stores live in `crate::infrastructure::persistence`; a `mockall` mock is
//! generated for unit tests.

pub mod mapping_store;

pub use mapping_store::{MappingFilter, MappingStore, Predicate, StoreError, UniqueField};

#[cfg(test)]
pub use mapping_store::MockMappingStore;
