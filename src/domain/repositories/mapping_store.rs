//! Store interface for mapping persistence.

use crate::domain::entities::{Mapping, MappingPatch};
use async_trait::async_trait;

/// Column covered by a uniqueness constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    ShortId,
    LongUrl,
}

/// Errors reported by a [`MappingStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A write would break a uniqueness constraint.
    #[error("duplicate key on {field:?}")]
    DuplicateKey { field: UniqueField },

    /// The targeted record does not exist.
    #[error("record not found")]
    NotFound,

    /// The backing store could not serve the request.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Condition on a single string field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Eq(String),
    Ne(String),
}

impl Predicate {
    fn matches(&self, value: &str) -> bool {
        match self {
            Predicate::Eq(expected) => value == expected,
            Predicate::Ne(excluded) => value != excluded,
        }
    }
}

/// Conjunction of optional field predicates.
///
/// An empty filter matches every mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingFilter {
    pub short_id: Option<Predicate>,
    pub long_url: Option<Predicate>,
}

impl MappingFilter {
    /// Filter matching every mapping.
    pub fn all() -> Self {
        Self::default()
    }

    /// Filter matching the mapping with this short id.
    pub fn by_short_id(short_id: impl Into<String>) -> Self {
        Self::all().short_id_eq(short_id)
    }

    /// Filter matching mappings that point at `long_url` under any short id
    /// other than `short_id`.
    pub fn twins_of(long_url: impl Into<String>, short_id: impl Into<String>) -> Self {
        Self::all().long_url_eq(long_url).short_id_ne(short_id)
    }

    pub fn short_id_eq(mut self, short_id: impl Into<String>) -> Self {
        self.short_id = Some(Predicate::Eq(short_id.into()));
        self
    }

    pub fn short_id_ne(mut self, short_id: impl Into<String>) -> Self {
        self.short_id = Some(Predicate::Ne(short_id.into()));
        self
    }

    pub fn long_url_eq(mut self, long_url: impl Into<String>) -> Self {
        self.long_url = Some(Predicate::Eq(long_url.into()));
        self
    }

    /// Evaluates the filter against a mapping held in memory.
    pub fn matches(&self, mapping: &Mapping) -> bool {
        self.short_id
            .as_ref()
            .is_none_or(|p| p.matches(&mapping.short_id))
            && self
                .long_url
                .as_ref()
                .is_none_or(|p| p.matches(&mapping.long_url))
    }
}

/// Durable keyed storage for mappings.
///
/// Implementations must enforce uniqueness of both `short_id` and `long_url`
/// at write time and report violations as [`StoreError::DuplicateKey`]. The
/// registry's existence checks run before the write and are not atomic with
/// it, so this is the only guarantee that survives concurrent writers.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgMappingStore`] - PostgreSQL
/// - [`crate::infrastructure::persistence::InMemoryMappingStore`] - process-local map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingStore: Send + Sync {
    /// Returns every mapping matching `filter`.
    async fn find_many(&self, filter: &MappingFilter) -> Result<Vec<Mapping>, StoreError>;

    /// Returns the first mapping matching `filter`, if any.
    async fn find_one(&self, filter: &MappingFilter) -> Result<Option<Mapping>, StoreError>;

    /// Persists a new mapping.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateKey`] if either field is already taken.
    async fn insert(&self, mapping: Mapping) -> Result<Mapping, StoreError>;

    /// Applies `patch` to the first mapping matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if nothing matches and
    /// [`StoreError::DuplicateKey`] if the new long URL is already taken.
    async fn update_one(
        &self,
        filter: &MappingFilter,
        patch: MappingPatch,
    ) -> Result<Mapping, StoreError>;

    /// Deletes the first mapping matching `filter` and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if nothing matches.
    async fn delete_one(&self, filter: &MappingFilter) -> Result<Mapping, StoreError>;

    /// Checks that the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = MappingFilter::all();
        assert!(filter.matches(&Mapping::new("a", "https://a.com")));
        assert!(filter.matches(&Mapping::new("b", "https://b.com")));
    }

    #[test]
    fn test_by_short_id() {
        let filter = MappingFilter::by_short_id("abc");
        assert!(filter.matches(&Mapping::new("abc", "https://x.com")));
        assert!(!filter.matches(&Mapping::new("abd", "https://x.com")));
    }

    #[test]
    fn test_twins_of_excludes_own_short_id() {
        let filter = MappingFilter::twins_of("https://x.com", "abc");

        assert!(!filter.matches(&Mapping::new("abc", "https://x.com")));
        assert!(filter.matches(&Mapping::new("def", "https://x.com")));
        assert!(!filter.matches(&Mapping::new("def", "https://y.com")));
    }
}
