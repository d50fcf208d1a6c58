//! Session-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ParticipantId, SessionId};

/// Errors surfaced by session and participation handlers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(SessionId),

    #[error("Join request not found: {0}")]
    ParticipantNotFound(ParticipantId),

    #[error("Permission denied: {0}")]
    Forbidden(String),

    #[error("Already requested to join this session")]
    AlreadyRequested,

    #[error("Session is full")]
    SessionFull,

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Validation failed for '{field}': {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Error: {0}")]
    Infrastructure(String),
}

impl SessionError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        SessionError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        SessionError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::NotFound(_) => ErrorCode::SessionNotFound,
            SessionError::ParticipantNotFound(_) => ErrorCode::ParticipantNotFound,
            SessionError::Forbidden(_) => ErrorCode::Forbidden,
            SessionError::AlreadyRequested => ErrorCode::AlreadyRequested,
            SessionError::SessionFull => ErrorCode::SessionFull,
            SessionError::InvalidState(_) => ErrorCode::InvalidStateTransition,
            SessionError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            SessionError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<DomainError> for SessionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden | ErrorCode::Unauthorized => SessionError::Forbidden(err.message),
            ErrorCode::AlreadyRequested => SessionError::AlreadyRequested,
            ErrorCode::SessionFull => SessionError::SessionFull,
            ErrorCode::InvalidStateTransition => SessionError::InvalidState(err.message),
            ErrorCode::ValidationFailed => SessionError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => SessionError::Infrastructure(err.to_string()),
        }
    }
}
