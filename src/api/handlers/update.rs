//! Handlers for mutating existing mappings.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use validator::Validate;

use crate::api::dto::update::{ExtendExpiryRequest, UpdateDestinationRequest, UpdatedResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Replaces the destination of an existing short code.
///
/// # Endpoint
///
/// `PUT /update`
///
/// # Request Body
///
/// ```json
/// { "shortUrl": "aB3xY9kQ", "destinationUrl": "https://example.org" }
/// ```
///
/// Responds `{"updated": true}` when the code existed and `{"updated": false}`
/// otherwise. An unknown code is not an error and creates nothing.
pub async fn update_destination_handler(
    State(state): State<AppState>,
    payload: Result<Json<UpdateDestinationRequest>, JsonRejection>,
) -> Result<Json<UpdatedResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let updated = state
        .mapping_service
        .update_destination(&payload.short_url, &payload.destination_url)
        .await?;

    Ok(Json(UpdatedResponse { updated }))
}

/// Sets a mapping's expiry to now plus `daysToAdd` days.
///
/// # Endpoint
///
/// `PUT /expiry`
///
/// # Request Body
///
/// ```json
/// { "shortUrl": "aB3xY9kQ", "daysToAdd": 10 }
/// ```
///
/// The new expiry is measured from the time of the request, not from the
/// previous expiry.
pub async fn extend_expiry_handler(
    State(state): State<AppState>,
    payload: Result<Json<ExtendExpiryRequest>, JsonRejection>,
) -> Result<Json<UpdatedResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let days_to_add = payload
        .days_to_add
        .ok_or_else(|| AppError::validation("daysToAdd is required"))?;

    let updated = state
        .mapping_service
        .extend_expiry(&payload.short_url, days_to_add)
        .await?;

    Ok(Json(UpdatedResponse { updated }))
}
