//! GetSessionHandler - Query handler for a single session.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::session::{SessionError, StudySession};
use crate::ports::SessionRepository;

/// Query to get a session by ID.
#[derive(Debug, Clone)]
pub struct GetSessionQuery {
    pub session_id: SessionId,
}

/// Handler for retrieving a session with its participants.
pub struct GetSessionHandler {
    repository: Arc<dyn SessionRepository>,
}

impl GetSessionHandler {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetSessionQuery) -> Result<StudySession, SessionError> {
        self.repository
            .find_by_id(&query.session_id)
            .await?
            .ok_or(SessionError::NotFound(query.session_id))
    }
}
