//! Join requests against a study session.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{
    DomainError, ErrorCode, ParticipantId, SessionId, Timestamp, UserId, ValidationError,
};

/// Lifecycle status of a join request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ParticipantStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipantStatus::Pending => "pending",
            ParticipantStatus::Approved => "approved",
            ParticipantStatus::Rejected => "rejected",
        }
    }

    /// Validates a transition from this status to another.
    ///
    /// Valid transitions:
    /// - Pending -> Approved | Rejected
    /// - Approved -> Rejected
    /// - Rejected -> Approved
    pub fn can_transition_to(&self, target: &ParticipantStatus) -> bool {
        use ParticipantStatus::*;
        matches!(
            (self, target),
            (Pending, Approved) | (Pending, Rejected) | (Approved, Rejected) | (Rejected, Approved)
        )
    }
}

impl fmt::Display for ParticipantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ParticipantStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ParticipantStatus::Pending),
            "approved" => Ok(ParticipantStatus::Approved),
            "rejected" => Ok(ParticipantStatus::Rejected),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown participant status '{}'", other),
            )),
        }
    }
}

/// A user's request to join a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    id: ParticipantId,
    session_id: SessionId,
    user_id: UserId,
    status: ParticipantStatus,
    requested_at: Timestamp,
    responded_at: Option<Timestamp>,
}

impl Participant {
    /// Create a new pending join request.
    pub fn request(session_id: SessionId, user_id: UserId, requested_at: Timestamp) -> Self {
        Self {
            id: ParticipantId::new(),
            session_id,
            user_id,
            status: ParticipantStatus::Pending,
            requested_at,
            responded_at: None,
        }
    }

    /// Reconstitute a participant from persistence (no validation).
    pub fn reconstitute(
        id: ParticipantId,
        session_id: SessionId,
        user_id: UserId,
        status: ParticipantStatus,
        requested_at: Timestamp,
        responded_at: Option<Timestamp>,
    ) -> Self {
        Self {
            id,
            session_id,
            user_id,
            status,
            requested_at,
            responded_at,
        }
    }

    pub fn id(&self) -> ParticipantId {
        self.id
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn status(&self) -> ParticipantStatus {
        self.status
    }

    pub fn requested_at(&self) -> &Timestamp {
        &self.requested_at
    }

    pub fn responded_at(&self) -> Option<&Timestamp> {
        self.responded_at.as_ref()
    }

    pub fn is_approved(&self) -> bool {
        self.status == ParticipantStatus::Approved
    }

    /// Record the host's answer to this request.
    ///
    /// Returns the previous status.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if `status` is `Pending`
    /// - `InvalidStateTransition` if the request already has that status
    pub fn respond(
        &mut self,
        status: ParticipantStatus,
        responded_at: Timestamp,
    ) -> Result<ParticipantStatus, DomainError> {
        if status == ParticipantStatus::Pending {
            return Err(DomainError::validation(
                "status",
                "A response must be either approved or rejected",
            ));
        }
        if !self.status.can_transition_to(&status) {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Join request is already {}", self.status),
            ));
        }

        let previous = std::mem::replace(&mut self.status, status);
        self.responded_at = Some(responded_at);
        Ok(previous)
    }
}
