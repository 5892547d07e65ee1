//! In-process implementation of the mapping repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::entities::{NewMapping, UrlMapping};
use crate::domain::repositories::{MappingRepository, StoreError};

/// Mapping store kept in a process-local hash map.
///
/// Used for local development (`STORE_BACKEND=memory`) and tests. Contents
/// are lost when the process exits. The write lock is held for exactly one
/// operation, which gives the same per-operation atomicity as the SQL store.
#[derive(Default)]
pub struct InMemoryMappingRepository {
    mappings: RwLock<HashMap<String, UrlMapping>>,
}

impl InMemoryMappingRepository {
    pub fn new() -> Self {
        debug!("Using in-memory mapping store");
        Self::default()
    }

    /// Number of stored mappings.
    pub async fn len(&self) -> usize {
        self.mappings.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.mappings.read().await.is_empty()
    }
}

#[async_trait]
impl MappingRepository for InMemoryMappingRepository {
    async fn insert(&self, new_mapping: NewMapping) -> Result<UrlMapping, StoreError> {
        let mut mappings = self.mappings.write().await;

        if mappings.contains_key(&new_mapping.short_code) {
            return Err(StoreError::Duplicate);
        }

        let mapping = UrlMapping::from_new(new_mapping, Utc::now());
        mappings.insert(mapping.short_code.clone(), mapping.clone());
        Ok(mapping)
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<UrlMapping>, StoreError> {
        Ok(self.mappings.read().await.get(short_code).cloned())
    }

    async fn update_destination(
        &self,
        short_code: &str,
        destination_url: &str,
    ) -> Result<bool, StoreError> {
        let mut mappings = self.mappings.write().await;
        let Some(mapping) = mappings.get_mut(short_code) else {
            return Ok(false);
        };

        mapping.destination_url = destination_url.to_string();
        mapping.updated_at = Utc::now();
        Ok(true)
    }

    async fn set_expiry(
        &self,
        short_code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        let mut mappings = self.mappings.write().await;
        let Some(mapping) = mappings.get_mut(short_code) else {
            return Ok(false);
        };

        mapping.expires_at = expires_at;
        mapping.updated_at = Utc::now();
        Ok(true)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, StoreError> {
        let mut mappings = self.mappings.write().await;
        let before = mappings.len();
        mappings.retain(|_, mapping| !mapping.is_expired_at(now));
        Ok((before - mappings.len()) as u64)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
