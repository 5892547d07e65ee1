//! PostgreSQL implementation of the mapping repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::instrument;

use crate::domain::entities::{NewMapping, UrlMapping};
use crate::domain::repositories::{MappingRepository, StoreError};
use crate::utils::db_error::is_unique_violation_on_code;

/// PostgreSQL repository for URL mappings.
///
/// Each method is a single statement, so every operation is atomic on its own.
/// Uniqueness of `short_code` comes from the table's primary key.
pub struct PgMappingRepository {
    pool: Arc<PgPool>,
}

impl PgMappingRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MappingRepository for PgMappingRepository {
    #[instrument(skip(self, new_mapping), fields(short_code = %new_mapping.short_code))]
    async fn insert(&self, new_mapping: NewMapping) -> Result<UrlMapping, StoreError> {
        sqlx::query_as::<_, UrlMapping>(
            r#"
            INSERT INTO url_mappings (short_code, destination_url, expires_at)
            VALUES ($1, $2, $3)
            RETURNING short_code, destination_url, expires_at, created_at, updated_at
            "#,
        )
        .bind(&new_mapping.short_code)
        .bind(&new_mapping.destination_url)
        .bind(new_mapping.expires_at)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| {
            if is_unique_violation_on_code(&e) {
                StoreError::Duplicate
            } else {
                StoreError::Database(e)
            }
        })
    }

    #[instrument(skip(self))]
    async fn find_by_code(&self, short_code: &str) -> Result<Option<UrlMapping>, StoreError> {
        let row = sqlx::query_as::<_, UrlMapping>(
            r#"
            SELECT short_code, destination_url, expires_at, created_at, updated_at
            FROM url_mappings
            WHERE short_code = $1
            "#,
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row)
    }

    #[instrument(skip(self))]
    async fn update_destination(
        &self,
        short_code: &str,
        destination_url: &str,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE url_mappings
            SET destination_url = $2, updated_at = NOW()
            WHERE short_code = $1
            "#,
        )
        .bind(short_code)
        .bind(destination_url)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn set_expiry(
        &self,
        short_code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE url_mappings
            SET expires_at = $2, updated_at = NOW()
            WHERE short_code = $1
            "#,
        )
        .bind(short_code)
        .bind(expires_at)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM url_mappings WHERE expires_at <= $1")
            .bind(now)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
