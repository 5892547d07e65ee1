//! DTOs for the shorten endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request body for `POST /shorten`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    /// The destination to shorten (absolute http/https URL).
    #[serde(default)]
    #[validate(length(min = 1, message = "destinationUrl is required"))]
    pub destination_url: String,
}

/// Response body for `POST /shorten`.
///
/// `short_url` carries the bare short code, not a full URL.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub short_url: String,
}
