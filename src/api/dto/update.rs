//! DTOs for the destination and expiry update endpoints.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, PickFirst, serde_as};
use validator::Validate;

use crate::application::services::MAX_EXPIRY_DAYS;

/// Request body for `PUT /update`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDestinationRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "shortUrl is required"))]
    pub short_url: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "destinationUrl is required"))]
    pub destination_url: String,
}

/// Request body for `PUT /expiry`.
///
/// `daysToAdd` accepts a JSON integer or a numeric string (`10` or `"10"`).
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExtendExpiryRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "shortUrl is required"))]
    pub short_url: String,

    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    #[validate(
        required(message = "daysToAdd is required"),
        range(min = 1, max = MAX_EXPIRY_DAYS, message = "daysToAdd must be a positive number of days")
    )]
    pub days_to_add: Option<i64>,
}

/// Response body shared by `PUT /update` and `PUT /expiry`.
#[derive(Debug, Serialize)]
pub struct UpdatedResponse {
    pub updated: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_days_to_add_accepts_number_and_string() {
        let from_number: ExtendExpiryRequest =
            serde_json::from_value(json!({ "shortUrl": "abc", "daysToAdd": 10 })).unwrap();
        let from_string: ExtendExpiryRequest =
            serde_json::from_value(json!({ "shortUrl": "abc", "daysToAdd": "10" })).unwrap();

        assert_eq!(from_number.days_to_add, Some(10));
        assert_eq!(from_string.days_to_add, Some(10));
    }

    #[test]
    fn test_days_to_add_missing_fails_validation() {
        let request: ExtendExpiryRequest =
            serde_json::from_value(json!({ "shortUrl": "abc" })).unwrap();
        assert!(request.days_to_add.is_none());
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_days_to_add_negative_fails_validation() {
        let request: ExtendExpiryRequest =
            serde_json::from_value(json!({ "shortUrl": "abc", "daysToAdd": -3 })).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_update_request_camel_case() {
        let request: UpdateDestinationRequest = serde_json::from_value(
            json!({ "shortUrl": "abc123", "destinationUrl": "https://new.com" }),
        )
        .unwrap();
        assert_eq!(request.short_url, "abc123");
        assert_eq!(request.destination_url, "https://new.com");
        assert!(request.validate().is_ok());
    }
}
