//! Mapping from catalog outcomes to HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use comics_core::{Error, ValidationError};

/// Errors returned by handlers.
#[derive(Debug)]
pub enum ApiError {
    /// Rejected by the rule set: 400 with the messages verbatim.
    Validation(ValidationError),
    /// Request body is not JSON: 400.
    BadRequest(String),
    /// No record with the requested id: 404.
    NotFound,
    /// Store or report failure: 500 with a generic message.
    Internal(Error),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::Validation(v) => ApiError::Validation(v),
            other => ApiError::Internal(other),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(v) => (StatusCode::BAD_REQUEST, v.to_string()).into_response(),
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message).into_response(),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "No existe").into_response(),
            ApiError::Internal(err) => {
                error!(error = %err, "Request failed");
                let message = match err {
                    Error::Store(_) => "Error al leer el archivo",
                    _ => "Error interno del servidor",
                };
                (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
        }
    }
}
