//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::{debug, error};

use crate::error::AppError;
use crate::state::AppState;

/// Body returned for unknown short codes.
pub const NOT_FOUND_MESSAGE: &str = "URL not found";

/// Redirects a short code to its destination URL.
///
/// # Endpoint
///
/// `GET /{short_url}`
///
/// Returns 307 Temporary Redirect with the destination in `Location`.
/// Expiry is not enforced here; a mapping past its expiry still resolves
/// until it is purged.
///
/// # Errors
///
/// Returns 404 with the plain text body `URL not found` if the code is
/// unknown, and 500 if the store fails.
pub async fn redirect_handler(
    Path(short_url): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let Some(destination) = state.mapping_service.resolve(&short_url).await? else {
        debug!(short_code = %short_url, "Short code not found");
        return Ok((StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE).into_response());
    };

    let location = HeaderValue::try_from(destination.as_str()).map_err(|e| {
        error!(short_code = %short_url, error = %e, "Stored destination is not a valid Location header");
        AppError::persistence("Error while getting destination URL", None)
    })?;

    debug!(short_code = %short_url, destination = %destination, "Redirecting");

    Ok((StatusCode::TEMPORARY_REDIRECT, [(header::LOCATION, location)]).into_response())
}
