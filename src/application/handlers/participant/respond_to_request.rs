//! RespondToRequestHandler - Approve or reject a join request.
//!
//! Approval is gated on capacity: once the approved count reaches the
//! session's capacity no further request can be approved. Rejections are
//! always allowed. The check here fails fast; repositories enforce it again
//! when writing, since another approval may land in between.

use std::sync::Arc;

use crate::domain::foundation::{Clock, ParticipantId};
use crate::domain::session::{Participant, ParticipantStatus, SessionError};
use crate::ports::{ParticipantRepository, SessionRepository};

/// Command recording the host's answer to a request.
#[derive(Debug, Clone)]
pub struct RespondToRequestCommand {
    pub participant_id: ParticipantId,
    pub status: ParticipantStatus,
}

/// Handler for responding to join requests.
pub struct RespondToRequestHandler {
    sessions: Arc<dyn SessionRepository>,
    participants: Arc<dyn ParticipantRepository>,
    clock: Arc<dyn Clock>,
}

impl RespondToRequestHandler {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        participants: Arc<dyn ParticipantRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            sessions,
            participants,
            clock,
        }
    }

    pub async fn handle(&self, cmd: RespondToRequestCommand) -> Result<Participant, SessionError> {
        let mut participant = self
            .participants
            .find_by_id(&cmd.participant_id)
            .await?
            .ok_or(SessionError::ParticipantNotFound(cmd.participant_id))?;

        if cmd.status == ParticipantStatus::Approved && !participant.is_approved() {
            let session_id = participant.session_id();
            let session = self
                .sessions
                .find_by_id(&session_id)
                .await?
                .ok_or(SessionError::NotFound(session_id))?;
            if !session.has_capacity() {
                return Err(SessionError::SessionFull);
            }
        }

        let previous = participant.respond(cmd.status, self.clock.now())?;
        self.participants.update(&participant).await?;

        tracing::info!(
            participant_id = %participant.id(),
            from = %previous,
            to = %participant.status(),
            "join request answered"
        );
        Ok(participant)
    }
}
