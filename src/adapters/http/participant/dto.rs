//! HTTP DTOs for participation endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::session::{Participant, ParticipantStatus};

/// Host's answer to a join request.
#[derive(Debug, Clone, Deserialize)]
pub struct RespondToRequestBody {
    pub status: ParticipantStatus,
}

/// Join request as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantResponse {
    pub id: String,
    pub session_id: String,
    pub user_id: String,
    pub status: ParticipantStatus,
    pub requested_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
}

impl From<&Participant> for ParticipantResponse {
    fn from(participant: &Participant) -> Self {
        Self {
            id: participant.id().to_string(),
            session_id: participant.session_id().to_string(),
            user_id: participant.user_id().to_string(),
            status: participant.status(),
            requested_at: *participant.requested_at().as_datetime(),
            responded_at: participant.responded_at().map(|t| *t.as_datetime()),
        }
    }
}

impl From<Participant> for ParticipantResponse {
    fn from(participant: Participant) -> Self {
        Self::from(&participant)
    }
}
