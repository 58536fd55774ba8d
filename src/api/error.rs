use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::models::{DecodeError, FieldViolation, StoreError};

/// Request-level failures, mapped onto HTTP status codes.
///
/// Per-record import failures never reach this type; the engine folds them
/// into the report before the handler returns.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("Invalid data")]
    Validation(Vec<FieldViolation>),
    #[error("{0}")]
    NotFound(&'static str),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Store(#[from] StoreError)
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<FieldViolation>
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message, Vec::new()),
            ApiError::Validation(violations) => {
                (StatusCode::BAD_REQUEST, "Invalid data".to_string(), violations)
            }
            ApiError::Decode(decode_error) => {
                (StatusCode::BAD_REQUEST, decode_error.to_string(), Vec::new())
            }
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message.to_string(), Vec::new()),
            ApiError::Store(store_error) => {
                error!("Store failure: {store_error}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    Vec::new()
                )
            }
        };

        (
            status,
            Json(ErrorBody {
                message,
                errors
            })
        )
            .into_response()
    }
}
