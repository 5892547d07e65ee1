//! Repository trait for the mapping store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::entities::{NewMapping, UrlMapping};

/// Errors reported by a mapping store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The short code is already taken.
    #[error("short code already exists")]
    Duplicate,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Store contract for short code → destination mappings.
///
/// Every operation is a single atomic statement against the store; uniqueness
/// of `short_code` is enforced by the store itself, not by callers.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgMappingRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::InMemoryMappingRepository`] - process-local map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingRepository: Send + Sync {
    /// Inserts a new mapping.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Duplicate`] if the short code already exists,
    /// [`StoreError::Database`] on any other store failure.
    async fn insert(&self, new_mapping: NewMapping) -> Result<UrlMapping, StoreError>;

    /// Finds a mapping by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] on store failure.
    async fn find_by_code(&self, short_code: &str) -> Result<Option<UrlMapping>, StoreError>;

    /// Replaces the destination of an existing mapping.
    ///
    /// Returns `Ok(false)` without creating anything when no mapping matches.
    async fn update_destination(
        &self,
        short_code: &str,
        destination_url: &str,
    ) -> Result<bool, StoreError>;

    /// Overwrites the expiry of an existing mapping.
    ///
    /// Returns `Ok(false)` when no mapping matches.
    async fn set_expiry(
        &self,
        short_code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, StoreError>;

    /// Deletes every mapping whose expiry is at or before `now`.
    ///
    /// Returns the number of removed mappings.
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, StoreError>;

    /// Performs a cheap round trip to verify the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
