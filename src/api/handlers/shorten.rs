//! Handler for URL shortening endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short code for a destination URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "destinationUrl": "https://example.com/some/long/path" }
/// ```
///
/// # Response
///
/// ```json
/// { "shortUrl": "aB3xY9kQ" }
/// ```
///
/// The mapping expires after the configured default number of days.
///
/// # Errors
///
/// - 400 if `destinationUrl` is missing, empty or not an http/https URL
/// - 500 if the store fails or no free code is found within the retry bound
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let mapping = state
        .mapping_service
        .shorten(&payload.destination_url)
        .await?;

    Ok(Json(ShortenResponse {
        short_url: mapping.short_code,
    }))
}
