//! API error types and responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use shopbridge_core::CoreError;

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Unauthorized - missing credentials.
    #[error("unauthorized")]
    Unauthorized,

    /// Bad request - invalid input or signature.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The deployment is missing required configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),

    /// External service error.
    #[error("external service error: {0}")]
    ExternalService(String),
}

/// JSON error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized", self.to_string()),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            Self::Configuration(msg) => {
                tracing::error!(error = %msg, "Service misconfigured");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "configuration_error",
                    "The service is not configured to handle this request".to_string(),
                )
            }
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
            Self::ExternalService(msg) => (
                StatusCode::BAD_GATEWAY,
                "external_service_error",
                msg.clone(),
            ),
        };

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<shopbridge_backend::BackendError> for ApiError {
    fn from(err: shopbridge_backend::BackendError) -> Self {
        match err {
            shopbridge_backend::BackendError::Configuration(msg) => Self::Configuration(msg),
            other => Self::ExternalService(other.to_string()),
        }
    }
}
