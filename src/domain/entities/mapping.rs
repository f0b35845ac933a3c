//! Mapping entity representing a registered redirection.

use serde::{Deserialize, Serialize};

/// A short identifier and the long URL it redirects to.
///
/// `short_id` is the external key and never changes once the mapping exists.
/// Only `long_url` is updated, and only through an explicit update request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mapping {
    pub short_id: String,
    pub long_url: String,
}

impl Mapping {
    /// Creates a new Mapping instance.
    pub fn new(short_id: impl Into<String>, long_url: impl Into<String>) -> Self {
        Self {
            short_id: short_id.into(),
            long_url: long_url.into(),
        }
    }
}

/// Caller-supplied registration or update payload.
///
/// Both fields are optional at this level: a missing `short_id` is derived
/// from the long URL on create, and a missing `long_url` is rejected by the
/// registry as invalid input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingCandidate {
    #[serde(default)]
    pub short_id: Option<String>,
    #[serde(default)]
    pub long_url: Option<String>,
}

impl MappingCandidate {
    /// Candidate carrying only a long URL.
    pub fn from_long_url(long_url: impl Into<String>) -> Self {
        Self {
            short_id: None,
            long_url: Some(long_url.into()),
        }
    }

    /// Candidate carrying both an explicit short id and a long URL.
    pub fn with_short_id(short_id: impl Into<String>, long_url: impl Into<String>) -> Self {
        Self {
            short_id: Some(short_id.into()),
            long_url: Some(long_url.into()),
        }
    }
}

/// Changes applied to a stored mapping by an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingPatch {
    pub long_url: String,
}
