//! Mapping store implementations.
//!
//! - [`PgMappingStore`] - PostgreSQL via SQLx, uniqueness enforced by the schema
//! - [`InMemoryMappingStore`] - process-local map, uniqueness enforced under a lock

pub mod memory_mapping_store;
pub mod pg_mapping_store;

pub use memory_mapping_store::InMemoryMappingStore;
pub use pg_mapping_store::PgMappingStore;
