//! DTOs for the redirection management endpoints.

use serde::Deserialize;

use crate::domain::repositories::MappingFilter;

/// Query parameters accepted by `GET /redirections`.
///
/// Each parameter present narrows the listing to mappings whose field is
/// equal to the given value.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub short_id: Option<String>,
    pub long_url: Option<String>,
}

impl ListQuery {
    pub fn into_filter(self) -> MappingFilter {
        let mut filter = MappingFilter::all();
        if let Some(short_id) = self.short_id {
            filter = filter.short_id_eq(short_id);
        }
        if let Some(long_url) = self.long_url {
            filter = filter.long_url_eq(long_url);
        }
        filter
    }
}
