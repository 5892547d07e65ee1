//! API route configuration.

use axum::{
    Router,
    routing::{post, put},
};

use crate::api::handlers::{extend_expiry_handler, shorten_handler, update_destination_handler};
use crate::state::AppState;

/// Mapping management routes.
///
/// # Endpoints
///
/// - `POST /shorten` - Create a short code for a destination URL
/// - `PUT  /update`  - Replace the destination of an existing code
/// - `PUT  /expiry`  - Reset a code's expiry to now plus N days
pub fn mapping_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/update", put(update_destination_handler))
        .route("/expiry", put(extend_expiry_handler))
}
