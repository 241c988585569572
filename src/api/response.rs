//! Response types for the PPh21 Withholding Engine API.
//!
//! Input errors are reported with one uniform client error that carries no
//! detail about which field failed; the detail is only logged.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// The single error returned for any rejected input.
    pub fn invalid_input() -> Self {
        Self::new("INVALID_INPUT", "Invalid tax calculation input")
    }

    /// The error returned when the server configuration is unusable.
    pub fn config_error() -> Self {
        Self::new("CONFIG_ERROR", "Configuration error")
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A `400 Bad Request` carrying [`ApiError::invalid_input`].
    pub fn invalid_input() -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: ApiError::invalid_input(),
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::InvalidStatus { .. } | EngineError::InvalidAmount { .. } => {
                ApiErrorResponse::invalid_input()
            }
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::config_error(),
            },
        }
    }
}
