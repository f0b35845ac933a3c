//! Mapping registration service.

use std::sync::Arc;

use crate::domain::entities::{Mapping, MappingCandidate, MappingPatch};
use crate::domain::repositories::{MappingFilter, MappingStore, StoreError};
use crate::error::{
    AppError, MSG_ID_MISMATCH, MSG_ID_TAKEN, MSG_NOT_FOUND, MSG_URL_MISSING, MSG_URL_TAKEN,
};
use crate::utils::short_id::{DEFAULT_SHORT_ID_LENGTH, generate, validate_short_id};
use crate::utils::url_validator::validate_long_url;
use serde_json::json;
use tracing::{debug, info};

/// Service owning the rules for registering, changing and removing mappings.
///
/// Guarantees that a short id maps to exactly one long URL and that a long
/// URL is registered under at most one short id. Existence checks run before
/// each write to produce precise errors; the store's own uniqueness
/// constraints back them up against concurrent writers, and any duplicate-key
/// failure at write time is reported as [`AppError::Conflict`].
pub struct Registry<S: ?Sized> {
    store: Arc<S>,
    short_id_length: usize,
}

impl<S: MappingStore + ?Sized> Registry<S> {
    /// Creates a registry over `store` deriving 7-character short ids.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            short_id_length: DEFAULT_SHORT_ID_LENGTH,
        }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Returns the mappings matching `filter`.
    ///
    /// The sequence is consumed once; call again for a fresh read.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on store errors.
    pub async fn find(
        &self,
        filter: &MappingFilter,
    ) -> Result<std::vec::IntoIter<Mapping>, AppError> {
        let mappings = self.store.find_many(filter).await?;
        Ok(mappings.into_iter())
    }

    /// Retrieves the mapping for `short_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no mapping has this short id.
    pub async fn get(&self, short_id: &str) -> Result<Mapping, AppError> {
        debug!(short_id, "Looking up redirection");

        self.store
            .find_one(&MappingFilter::by_short_id(short_id))
            .await?
            .ok_or_else(|| AppError::not_found(MSG_NOT_FOUND, json!({ "short_id": short_id })))
    }

    /// Registers a new mapping.
    ///
    /// When the candidate carries no short id (or an empty one), one is
    /// derived from the long URL, so registering the same URL twice collides
    /// on the URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidInput`] if:
    /// - The long URL is missing or not an absolute HTTP(S) URL
    /// - The supplied short id is malformed
    ///
    /// Returns [`AppError::Conflict`] if the short id is taken or the long URL
    /// is already registered under another short id.
    pub async fn create(&self, candidate: MappingCandidate) -> Result<Mapping, AppError> {
        let long_url = require_long_url(candidate.long_url)?;

        let short_id = match supplied_short_id(candidate.short_id) {
            Some(short_id) => {
                validate_short_id(&short_id)?;
                short_id
            }
            None => generate(&long_url, self.short_id_length),
        };

        if self
            .store
            .find_one(&MappingFilter::by_short_id(&short_id))
            .await?
            .is_some()
        {
            return Err(AppError::conflict(
                MSG_ID_TAKEN,
                json!({ "short_id": short_id }),
            ));
        }

        if self.has_twins(&long_url, &short_id).await? {
            return Err(AppError::conflict(
                MSG_URL_TAKEN,
                json!({ "short_id": short_id, "long_url": long_url }),
            ));
        }

        let mapping = self.store.insert(Mapping::new(short_id, long_url)).await?;

        info!(
            short_id = %mapping.short_id,
            long_url = %mapping.long_url,
            "Redirection registered"
        );

        Ok(mapping)
    }

    /// Changes the long URL of the mapping for `short_id`.
    ///
    /// The short id itself never changes. A candidate naming a different
    /// short id is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no mapping has this short id.
    /// Returns [`AppError::InvalidInput`] if the long URL is missing or
    /// malformed, or the candidate names another short id.
    /// Returns [`AppError::Conflict`] if another mapping has the long URL.
    pub async fn update(
        &self,
        short_id: &str,
        candidate: MappingCandidate,
    ) -> Result<Mapping, AppError> {
        self.get(short_id).await?;

        let long_url = require_long_url(candidate.long_url)?;

        if let Some(requested) = supplied_short_id(candidate.short_id)
            && requested != short_id
        {
            return Err(AppError::invalid_input(
                MSG_ID_MISMATCH,
                json!({ "short_id": short_id, "requested_short_id": requested }),
            ));
        }

        if self.has_twins(&long_url, short_id).await? {
            return Err(AppError::conflict(
                MSG_URL_TAKEN,
                json!({ "short_id": short_id, "long_url": long_url }),
            ));
        }

        let mapping = self
            .store
            .update_one(&MappingFilter::by_short_id(short_id), MappingPatch { long_url })
            .await
            .map_err(|e| match e {
                StoreError::NotFound => {
                    AppError::not_found(MSG_NOT_FOUND, json!({ "short_id": short_id }))
                }
                other => other.into(),
            })?;

        info!(
            short_id = %mapping.short_id,
            long_url = %mapping.long_url,
            "Redirection updated"
        );

        Ok(mapping)
    }

    /// Removes the mapping for `short_id` and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no mapping has this short id,
    /// including when it was already removed.
    pub async fn remove(&self, short_id: &str) -> Result<Mapping, AppError> {
        let mapping = self
            .store
            .delete_one(&MappingFilter::by_short_id(short_id))
            .await
            .map_err(|e| match e {
                StoreError::NotFound => {
                    AppError::not_found(MSG_NOT_FOUND, json!({ "short_id": short_id }))
                }
                other => other.into(),
            })?;

        info!(short_id = %mapping.short_id, "Redirection removed");

        Ok(mapping)
    }

    /// Returns true if a mapping other than `short_id` points at `long_url`.
    async fn has_twins(&self, long_url: &str, short_id: &str) -> Result<bool, AppError> {
        let twins = self
            .find(&MappingFilter::twins_of(long_url, short_id))
            .await?;
        Ok(twins.count() > 0)
    }
}

/// An empty short id counts as absent.
fn supplied_short_id(short_id: Option<String>) -> Option<String> {
    short_id.filter(|id| !id.is_empty())
}

/// Extracts and validates the long URL of a candidate.
fn require_long_url(long_url: Option<String>) -> Result<String, AppError> {
    let long_url = long_url
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::invalid_input(MSG_URL_MISSING, json!({})))?;

    validate_long_url(&long_url).map_err(|e| {
        AppError::invalid_input(
            "Invalid redirection target URL",
            json!({ "long_url": long_url, "reason": e.to_string() }),
        )
    })?;

    Ok(long_url)
}
