//! Process-local mapping store.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use crate::domain::entities::{Mapping, MappingPatch};
use crate::domain::repositories::{MappingFilter, MappingStore, StoreError, UniqueField};

/// In-memory store keyed by short id.
///
/// Every write checks both uniqueness constraints and applies the change
/// under a single lock, which gives the same guarantee as the unique
/// constraints of the PostgreSQL schema. Contents are lost on restart; used
/// for tests and `STORE_BACKEND=memory` deployments.
#[derive(Default)]
pub struct InMemoryMappingStore {
    inner: Mutex<BTreeMap<String, Mapping>>,
}

impl InMemoryMappingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `mappings`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateKey`] if the seed itself violates uniqueness.
    pub fn with_mappings(mappings: impl IntoIterator<Item = Mapping>) -> Result<Self, StoreError> {
        let store = Self::new();
        {
            let mut map = store.lock()?;
            for mapping in mappings {
                Self::check_unique(&map, &mapping, None)?;
                map.insert(mapping.short_id.clone(), mapping);
            }
        }
        Ok(store)
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<String, Mapping>>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Unavailable("mutex poisoned".into()))
    }

    /// Rejects `candidate` if another entry already holds its short id or
    /// long URL. `replacing` names the entry being overwritten by an update.
    fn check_unique(
        map: &BTreeMap<String, Mapping>,
        candidate: &Mapping,
        replacing: Option<&str>,
    ) -> Result<(), StoreError> {
        if replacing.is_none() && map.contains_key(&candidate.short_id) {
            return Err(StoreError::DuplicateKey {
                field: UniqueField::ShortId,
            });
        }

        let url_taken = map
            .values()
            .any(|m| m.long_url == candidate.long_url && Some(m.short_id.as_str()) != replacing);
        if url_taken {
            return Err(StoreError::DuplicateKey {
                field: UniqueField::LongUrl,
            });
        }

        Ok(())
    }

    fn first_key(map: &BTreeMap<String, Mapping>, filter: &MappingFilter) -> Option<String> {
        map.values()
            .find(|m| filter.matches(m))
            .map(|m| m.short_id.clone())
    }
}

#[async_trait]
impl MappingStore for InMemoryMappingStore {
    async fn find_many(&self, filter: &MappingFilter) -> Result<Vec<Mapping>, StoreError> {
        let map = self.lock()?;
        Ok(map.values().filter(|m| filter.matches(m)).cloned().collect())
    }

    async fn find_one(&self, filter: &MappingFilter) -> Result<Option<Mapping>, StoreError> {
        let map = self.lock()?;
        Ok(map.values().find(|m| filter.matches(m)).cloned())
    }

    async fn insert(&self, mapping: Mapping) -> Result<Mapping, StoreError> {
        let mut map = self.lock()?;
        Self::check_unique(&map, &mapping, None)?;
        map.insert(mapping.short_id.clone(), mapping.clone());
        Ok(mapping)
    }

    async fn update_one(
        &self,
        filter: &MappingFilter,
        patch: MappingPatch,
    ) -> Result<Mapping, StoreError> {
        let mut map = self.lock()?;
        let key = Self::first_key(&map, filter).ok_or(StoreError::NotFound)?;

        let updated = Mapping::new(key.clone(), patch.long_url);
        Self::check_unique(&map, &updated, Some(&key))?;
        map.insert(key, updated.clone());
        Ok(updated)
    }

    async fn delete_one(&self, filter: &MappingFilter) -> Result<Mapping, StoreError> {
        let mut map = self.lock()?;
        let key = Self::first_key(&map, filter).ok_or(StoreError::NotFound)?;
        map.remove(&key).ok_or(StoreError::NotFound)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.lock().map(|_| ())
    }
}
