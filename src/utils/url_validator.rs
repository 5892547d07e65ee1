//! Destination URL validation.
//!
//! Destinations are stored as the caller wrote them (trimmed) so that a
//! resolved URL compares equal to the submitted one. Input that is not plain
//! ASCII is stored in the parser's serialized form, which is always a valid
//! `Location` header value.

use url::Url;

use crate::error::AppError;

/// Errors that can occur during destination URL validation.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("destinationUrl is required")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,
}

impl From<UrlValidationError> for AppError {
    fn from(err: UrlValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

/// Validates a destination URL and returns the form to persist.
///
/// # Rules
///
/// 1. Surrounding whitespace is ignored; the remainder must be non-empty
/// 2. Must parse as an absolute URL
/// 3. Only `http` and `https` schemes are accepted
///
/// # Errors
///
/// Returns the matching [`UrlValidationError`] when any rule is violated.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(validate_destination_url(" https://example.com ").unwrap(), "https://example.com");
/// assert!(validate_destination_url("javascript:alert(1)").is_err());
/// ```
pub fn validate_destination_url(input: &str) -> Result<String, UrlValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlValidationError::Empty);
    }

    let url = Url::parse(trimmed).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    if trimmed.bytes().all(|b| b.is_ascii_graphic()) {
        Ok(trimmed.to_string())
    } else {
        Ok(url.into())
    }
}
