//! Application error taxonomy and its HTTP mapping.
//!
//! Store failures keep their [`StoreError`] as the error source so the cause
//! can be logged, while the response body only ever carries the generic
//! message.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::repositories::StoreError;

/// JSON body returned for every failed request: `{"error": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or malformed caller input.
    #[error("{message}")]
    Validation { message: String },

    /// The mapping store failed or short code allocation gave up.
    #[error("{message}")]
    Persistence {
        message: String,
        #[source]
        source: Option<StoreError>,
    },

    /// The entropy source backing the code generator failed.
    #[error("{message}")]
    Generator { message: String },
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn persistence(message: impl Into<String>, source: Option<StoreError>) -> Self {
        Self::Persistence {
            message: message.into(),
            source,
        }
    }

    pub fn generator(message: impl Into<String>) -> Self {
        Self::Generator {
            message: message.into(),
        }
    }

    /// Returns the HTTP status this error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Persistence { .. } | Self::Generator { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                errs.iter()
                    .find_map(|e| e.message.as_ref().map(ToString::to_string))
                    .unwrap_or_else(|| format!("{field} is invalid"))
            })
            .collect();
        fields.sort();

        Self::validation(fields.join("; "))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            Self::Validation { message } => {
                tracing::info!(%message, "Rejected invalid request");
            }
            Self::Persistence { message, source } => {
                tracing::error!(%message, source = ?source, "Store operation failed");
            }
            Self::Generator { message } => {
                tracing::error!(%message, "Short code generation failed");
            }
        }

        let body = ErrorBody {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
