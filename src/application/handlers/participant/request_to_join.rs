//! RequestToJoinHandler - Command handler for join requests.

use std::sync::Arc;

use crate::domain::foundation::{Clock, SessionId, UserId};
use crate::domain::session::{Participant, SessionError};
use crate::ports::{ParticipantRepository, SessionRepository};

/// Command to request a seat in a session.
#[derive(Debug, Clone)]
pub struct RequestToJoinCommand {
    pub session_id: SessionId,
    pub user_id: UserId,
}

/// Handler for creating pending join requests.
pub struct RequestToJoinHandler {
    sessions: Arc<dyn SessionRepository>,
    participants: Arc<dyn ParticipantRepository>,
    clock: Arc<dyn Clock>,
}

impl RequestToJoinHandler {
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

    pub async fn handle(&self, cmd: RequestToJoinCommand) -> Result<Participant, SessionError> {
        let session = self
            .sessions
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or(SessionError::NotFound(cmd.session_id))?;

        if session.is_host(&cmd.user_id) {
            return Err(SessionError::Forbidden(
                "Hosts cannot request to join their own session".to_string(),
            ));
        }
        if session.participant_for(&cmd.user_id).is_some() {
            return Err(SessionError::AlreadyRequested);
        }

        let participant = Participant::request(cmd.session_id, cmd.user_id, self.clock.now());
        self.participants.save(&participant).await?;

        tracing::info!(
            session_id = %participant.session_id(),
            participant_id = %participant.id(),
            "join request created"
        );
        Ok(participant)
    }
}
