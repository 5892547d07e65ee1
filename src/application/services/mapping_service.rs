//! Short link creation, resolution, and expiry service.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

use crate::domain::entities::{NewMapping, UrlMapping};
use crate::domain::repositories::{MappingRepository, StoreError};
use crate::error::AppError;
use crate::utils::code_generator::{CodeGenerator, validate_short_code};
use crate::utils::url_validator::validate_destination_url;

/// Largest accepted `days_to_add`, roughly a century.
pub const MAX_EXPIRY_DAYS: i64 = 36_500;

/// Expiry and allocation settings for [`MappingService`].
#[derive(Debug, Clone, Copy)]
pub struct ExpiryPolicy {
    /// Lifetime of a freshly created mapping, in days.
    pub default_expiry_days: i64,
    /// Maximum number of codes tried before shortening gives up.
    pub max_code_attempts: usize,
}

impl Default for ExpiryPolicy {
    fn default() -> Self {
        Self {
            default_expiry_days: 30,
            max_code_attempts: 5,
        }
    }
}

/// Orchestrates create / update / resolve / extend against the mapping store.
///
/// Holds no mutable state of its own; the store is the single source of truth
/// for uniqueness and for every mapping's fields.
pub struct MappingService {
    repository: Arc<dyn MappingRepository>,
    generator: Arc<dyn CodeGenerator>,
    policy: ExpiryPolicy,
}

impl MappingService {
    /// Creates a new mapping service.
    pub fn new(
        repository: Arc<dyn MappingRepository>,
        generator: Arc<dyn CodeGenerator>,
        policy: ExpiryPolicy,
    ) -> Self {
        Self {
            repository,
            generator,
            policy,
        }
    }

    /// Creates a mapping for `destination_url` under a freshly generated code.
    ///
    /// The mapping expires `default_expiry_days` after insertion. The same
    /// destination shortened twice yields two distinct codes.
    ///
    /// # Code Generation
    ///
    /// On a short code collision reported by the store, a new code is
    /// generated and the insert retried, up to `max_code_attempts` attempts in
    /// total. Each attempt is an independent insert.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an empty or non-http(s) URL,
    /// [`AppError::Generator`] if no code could be drawn, and
    /// [`AppError::Persistence`] on store failure or exhausted retries.
    pub async fn shorten(&self, destination_url: &str) -> Result<UrlMapping, AppError> {
        let destination_url = validate_destination_url(destination_url)?;
        let expires_at = self.expiry_from_now(self.policy.default_expiry_days)?;

        for attempt in 1..=self.policy.max_code_attempts {
            let short_code = self.generator.generate()?;

            let new_mapping = NewMapping {
                short_code: short_code.clone(),
                destination_url: destination_url.clone(),
                expires_at,
            };

            match self.repository.insert(new_mapping).await {
                Ok(mapping) => {
                    info!(short_code = %mapping.short_code, "Created short link");
                    return Ok(mapping);
                }
                Err(StoreError::Duplicate) => {
                    warn!(attempt, %short_code, "Generated short code was already taken");
                }
                Err(err) => {
                    return Err(AppError::persistence(
                        "Error while shortening URL",
                        Some(err),
                    ));
                }
            }
        }

        Err(AppError::persistence(
            "Error while shortening URL",
            Some(StoreError::Duplicate),
        ))
    }

    /// Replaces the destination of an existing mapping.
    ///
    /// Returns `false` when no mapping has this code; nothing is created.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an empty code or invalid URL and
    /// [`AppError::Persistence`] on store failure.
    pub async fn update_destination(
        &self,
        short_code: &str,
        new_destination_url: &str,
    ) -> Result<bool, AppError> {
        validate_short_code(short_code)?;
        let destination_url = validate_destination_url(new_destination_url)?;

        let updated = self
            .repository
            .update_destination(short_code, &destination_url)
            .await
            .map_err(|e| AppError::persistence("Error while updating short URL", Some(e)))?;

        debug!(short_code, updated, "Destination update processed");
        Ok(updated)
    }

    /// Looks up the destination for a short code.
    ///
    /// Expiry is not checked: an expired mapping still resolves.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on store failure.
    pub async fn resolve(&self, short_code: &str) -> Result<Option<String>, AppError> {
        if short_code.is_empty() {
            return Ok(None);
        }

        let mapping = self
            .repository
            .find_by_code(short_code)
            .await
            .map_err(|e| AppError::persistence("Error while getting destination URL", Some(e)))?;

        Ok(mapping.map(|m| m.destination_url))
    }

    /// Fetches the full mapping for a short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on store failure.
    pub async fn get_mapping(&self, short_code: &str) -> Result<Option<UrlMapping>, AppError> {
        self.repository
            .find_by_code(short_code)
            .await
            .map_err(|e| AppError::persistence("Error while getting short URL", Some(e)))
    }

    /// Sets a mapping's expiry to `now + days_to_add` days.
    ///
    /// The previous expiry is replaced, not extended. Returns `false` when no
    /// mapping has this code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `days_to_add` is outside
    /// `1..=MAX_EXPIRY_DAYS` or the code is empty, and
    /// [`AppError::Persistence`] on store failure.
    pub async fn extend_expiry(&self, short_code: &str, days_to_add: i64) -> Result<bool, AppError> {
        validate_short_code(short_code)?;

        if !(1..=MAX_EXPIRY_DAYS).contains(&days_to_add) {
            return Err(AppError::validation(format!(
                "daysToAdd must be between 1 and {MAX_EXPIRY_DAYS}"
            )));
        }

        let expires_at = self.expiry_from_now(days_to_add)?;

        let updated = self
            .repository
            .set_expiry(short_code, expires_at)
            .await
            .map_err(|e| AppError::persistence("Error while updating expiry time", Some(e)))?;

        debug!(short_code, %expires_at, updated, "Expiry update processed");
        Ok(updated)
    }

    /// Deletes every mapping whose expiry has passed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] on store failure.
    pub async fn purge_expired(&self) -> Result<u64, AppError> {
        let removed = self
            .repository
            .delete_expired(Utc::now())
            .await
            .map_err(|e| AppError::persistence("Error while purging expired URLs", Some(e)))?;

        info!(removed, "Purged expired short links");
        Ok(removed)
    }

    /// Verifies the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] if the round trip fails.
    pub async fn check_store(&self) -> Result<(), AppError> {
        self.repository
            .ping()
            .await
            .map_err(|e| AppError::persistence("Store unreachable", Some(e)))
    }

    fn expiry_from_now(&self, days: i64) -> Result<DateTime<Utc>, AppError> {
        Duration::try_days(days)
            .and_then(|d| Utc::now().checked_add_signed(d))
            .ok_or_else(|| AppError::validation(format!("Expiry of {days} days is out of range")))
    }
}
