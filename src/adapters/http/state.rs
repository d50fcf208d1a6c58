//! Shared application state for the HTTP layer.

use std::sync::Arc;

use crate::application::{
    CreateSessionHandler, GetSessionHandler, ListHostSessionsHandler,
    ListSessionParticipantsHandler, ListUpcomingSessionsHandler, ListUserRequestsHandler,
    RequestToJoinHandler, RespondToRequestHandler, SearchSessionsHandler,
};
use crate::domain::foundation::Clock;
use crate::ports::{ParticipantRepository, SessionRepository};

/// Dependencies every endpoint draws its handler from.
#[derive(Clone)]
pub struct StudyAppState {
    pub sessions: Arc<dyn SessionRepository>,
    pub participants: Arc<dyn ParticipantRepository>,
    pub clock: Arc<dyn Clock>,
}

impl StudyAppState {
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

    pub fn create_session_handler(&self) -> CreateSessionHandler {
        CreateSessionHandler::new(self.sessions.clone(), self.clock.clone())
    }

    pub fn get_session_handler(&self) -> GetSessionHandler {
        GetSessionHandler::new(self.sessions.clone())
    }

    pub fn list_upcoming_handler(&self) -> ListUpcomingSessionsHandler {
        ListUpcomingSessionsHandler::new(self.sessions.clone(), self.clock.clone())
    }

    pub fn list_host_sessions_handler(&self) -> ListHostSessionsHandler {
        ListHostSessionsHandler::new(self.sessions.clone())
    }

    pub fn search_handler(&self) -> SearchSessionsHandler {
        SearchSessionsHandler::new(self.sessions.clone(), self.clock.clone())
    }

    pub fn request_to_join_handler(&self) -> RequestToJoinHandler {
        RequestToJoinHandler::new(
            self.sessions.clone(),
            self.participants.clone(),
            self.clock.clone(),
        )
    }

    pub fn respond_to_request_handler(&self) -> RespondToRequestHandler {
        RespondToRequestHandler::new(
            self.sessions.clone(),
            self.participants.clone(),
            self.clock.clone(),
        )
    }

    pub fn list_session_participants_handler(&self) -> ListSessionParticipantsHandler {
        ListSessionParticipantsHandler::new(self.sessions.clone(), self.participants.clone())
    }

    pub fn list_user_requests_handler(&self) -> ListUserRequestsHandler {
        ListUserRequestsHandler::new(self.participants.clone())
    }
}
