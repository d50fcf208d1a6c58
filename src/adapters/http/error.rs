//! Error responses shared by every endpoint.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ErrorCode;
use crate::domain::session::SessionError;

/// Standard error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl ToString, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

/// API error type that converts handler errors to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Session(SessionError),
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        ApiError::Session(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Status code for a session-layer failure.
pub fn status_for(error: &SessionError) -> StatusCode {
    match error {
        SessionError::NotFound(_) | SessionError::ParticipantNotFound(_) => StatusCode::NOT_FOUND,
        SessionError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
        SessionError::Forbidden(_) => StatusCode::FORBIDDEN,
        SessionError::AlreadyRequested
        | SessionError::SessionFull
        | SessionError::InvalidState(_) => StatusCode::CONFLICT,
        SessionError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(msg)),
            ApiError::Session(SessionError::Infrastructure(msg)) => {
                tracing::error!(error = %msg, "request failed on infrastructure error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::internal("Internal server error"),
                )
            }
            ApiError::Session(err) => (status_for(&err), ErrorResponse::new(err.code(), err.to_string())),
        };

        (status, Json(body)).into_response()
    }
}
