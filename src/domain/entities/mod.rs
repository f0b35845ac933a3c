//! Core domain entities.
//!
//! The redirector has a single persisted entity, [`Mapping`], plus the
//! shapes used to create and change it:
//!
//! - [`MappingCandidate`] - caller payload for create/update, fields optional
//! - [`MappingPatch`] - the validated change handed to the store on update

pub mod mapping;

pub use mapping::{Mapping, MappingCandidate, MappingPatch};
