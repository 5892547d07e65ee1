//! URL mapping entity.

use chrono::{DateTime, Utc};

/// A short code and the destination it redirects to.
///
/// `expires_at` is advisory: resolution never consults it.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct UrlMapping {
    pub short_code: String,
    pub destination_url: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UrlMapping {
    /// Builds a mapping as it would look right after insertion.
    pub fn from_new(new_mapping: NewMapping, now: DateTime<Utc>) -> Self {
        Self {
            short_code: new_mapping.short_code,
            destination_url: new_mapping.destination_url,
            expires_at: new_mapping.expires_at,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns true if `expires_at` lies at or before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Input data for inserting a new mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMapping {
    pub short_code: String,
    pub destination_url: String,
    pub expires_at: DateTime<Utc>,
}
