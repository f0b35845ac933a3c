//! PostgreSQL implementation of the mapping store.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Mapping, MappingPatch};
use crate::domain::repositories::{
    MappingFilter, MappingStore, Predicate, StoreError, UniqueField,
};

/// Name of the unique constraint on `redirections.long_url`.
const LONG_URL_CONSTRAINT: &str = "redirections_long_url_key";

#[derive(sqlx::FromRow)]
struct MappingRow {
    short_id: String,
    long_url: String,
}

impl From<MappingRow> for Mapping {
    fn from(row: MappingRow) -> Self {
        Mapping::new(row.short_id, row.long_url)
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            let field = match db.constraint() {
                Some(LONG_URL_CONSTRAINT) => UniqueField::LongUrl,
                _ => UniqueField::ShortId,
            };
            return StoreError::DuplicateKey { field };
        }

        match e {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            other => StoreError::Unavailable(other.to_string()),
        }
    }
}

/// `WHERE` body matching [`FilterParams`] bound as `$1..$4`.
///
/// Unset parameters are NULL and disable their condition.
const FILTER_SQL: &str = r#"
    ($1::text IS NULL OR short_id = $1)
    AND ($2::text IS NULL OR short_id <> $2)
    AND ($3::text IS NULL OR long_url = $3)
    AND ($4::text IS NULL OR long_url <> $4)
"#;

/// A [`MappingFilter`] flattened into optional bind parameters.
#[derive(Debug, Default, PartialEq, Eq)]
struct FilterParams {
    short_id_eq: Option<String>,
    short_id_ne: Option<String>,
    long_url_eq: Option<String>,
    long_url_ne: Option<String>,
}

impl From<&MappingFilter> for FilterParams {
    fn from(filter: &MappingFilter) -> Self {
        fn split(predicate: &Option<Predicate>) -> (Option<String>, Option<String>) {
            match predicate {
                Some(Predicate::Eq(value)) => (Some(value.clone()), None),
                Some(Predicate::Ne(value)) => (None, Some(value.clone())),
                None => (None, None),
            }
        }

        let (short_id_eq, short_id_ne) = split(&filter.short_id);
        let (long_url_eq, long_url_ne) = split(&filter.long_url);

        Self {
            short_id_eq,
            short_id_ne,
            long_url_eq,
            long_url_ne,
        }
    }
}

/// PostgreSQL store for mappings.
///
/// Uniqueness of `short_id` and `long_url` is declared in the schema (see
/// `migrations/`), so concurrent inserts of the same URL are rejected by the
/// database even when both passed the registry's pre-check.
pub struct PgMappingStore {
    pool: Arc<PgPool>,
}

impl PgMappingStore {
    /// Creates a new store with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MappingStore for PgMappingStore {
    async fn find_many(&self, filter: &MappingFilter) -> Result<Vec<Mapping>, StoreError> {
        let params = FilterParams::from(filter);

        let rows = sqlx::query_as::<_, MappingRow>(&format!(
            "SELECT short_id, long_url FROM redirections WHERE {FILTER_SQL} \
             ORDER BY created_at, short_id"
        ))
        .bind(params.short_id_eq)
        .bind(params.short_id_ne)
        .bind(params.long_url_eq)
        .bind(params.long_url_ne)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Mapping::from).collect())
    }

    async fn find_one(&self, filter: &MappingFilter) -> Result<Option<Mapping>, StoreError> {
        let params = FilterParams::from(filter);

        let row = sqlx::query_as::<_, MappingRow>(&format!(
            "SELECT short_id, long_url FROM redirections WHERE {FILTER_SQL} \
             ORDER BY created_at, short_id LIMIT 1"
        ))
        .bind(params.short_id_eq)
        .bind(params.short_id_ne)
        .bind(params.long_url_eq)
        .bind(params.long_url_ne)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Mapping::from))
    }

    async fn insert(&self, mapping: Mapping) -> Result<Mapping, StoreError> {
        let row = sqlx::query_as::<_, MappingRow>(
            r#"
            INSERT INTO redirections (short_id, long_url)
            VALUES ($1, $2)
            RETURNING short_id, long_url
            "#,
        )
        .bind(mapping.short_id)
        .bind(mapping.long_url)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn update_one(
        &self,
        filter: &MappingFilter,
        patch: MappingPatch,
    ) -> Result<Mapping, StoreError> {
        let params = FilterParams::from(filter);

        sqlx::query_as::<_, MappingRow>(&format!(
            "UPDATE redirections SET long_url = $5, updated_at = NOW() \
             WHERE short_id = (SELECT short_id FROM redirections WHERE {FILTER_SQL} \
             ORDER BY created_at, short_id LIMIT 1) \
             RETURNING short_id, long_url"
        ))
        .bind(params.short_id_eq)
        .bind(params.short_id_ne)
        .bind(params.long_url_eq)
        .bind(params.long_url_ne)
        .bind(patch.long_url)
        .fetch_optional(self.pool.as_ref())
        .await?
        .map(Mapping::from)
        .ok_or(StoreError::NotFound)
    }

    async fn delete_one(&self, filter: &MappingFilter) -> Result<Mapping, StoreError> {
        let params = FilterParams::from(filter);

        sqlx::query_as::<_, MappingRow>(&format!(
            "DELETE FROM redirections \
             WHERE short_id = (SELECT short_id FROM redirections WHERE {FILTER_SQL} \
             ORDER BY created_at, short_id LIMIT 1) \
             RETURNING short_id, long_url"
        ))
        .bind(params.short_id_eq)
        .bind(params.short_id_ne)
        .bind(params.long_url_eq)
        .bind(params.long_url_ne)
        .fetch_optional(self.pool.as_ref())
        .await?
        .map(Mapping::from)
        .ok_or(StoreError::NotFound)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
