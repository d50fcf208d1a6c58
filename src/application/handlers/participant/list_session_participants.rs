//! ListSessionParticipantsHandler - All join requests on one session.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::session::{Participant, SessionError};
use crate::ports::{ParticipantRepository, SessionRepository};

/// Query for a session's participants.
#[derive(Debug, Clone)]
pub struct ListSessionParticipantsQuery {
    pub session_id: SessionId,
}

/// Handler listing a session's join requests, oldest first.
pub struct ListSessionParticipantsHandler {
    sessions: Arc<dyn SessionRepository>,
    participants: Arc<dyn ParticipantRepository>,
}

impl ListSessionParticipantsHandler {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        participants: Arc<dyn ParticipantRepository>,
    ) -> Self {
        Self {
            sessions,
            participants,
        }
    }

    pub async fn handle(
        &self,
        query: ListSessionParticipantsQuery,
    ) -> Result<Vec<Participant>, SessionError> {
        if self.sessions.find_by_id(&query.session_id).await?.is_none() {
            return Err(SessionError::NotFound(query.session_id));
        }
        Ok(self.participants.find_by_session(&query.session_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStudyStore;
    use crate::application::handlers::test_support::{session_on, user};
    use crate::domain::foundation::Timestamp;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn lists_requests_of_the_session() {
        let mut session = session_on("host", "Economics", NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(), 3);
        let base = Timestamp::now();
        for (offset, name) in ["ana", "ben"].iter().enumerate() {
            session
                .add_participant(Participant::request(
                    *session.id(),
                    user(name),
                    base.add_days(offset as i64),
                ))
                .unwrap();
        }
        let session_id = *session.id();
        let store = Arc::new(InMemoryStudyStore::with_sessions(vec![session]));
        let handler = ListSessionParticipantsHandler::new(store.clone(), store);

        let participants = handler
            .handle(ListSessionParticipantsQuery { session_id })
            .await
            .unwrap();

        let names: Vec<&str> = participants.iter().map(|p| p.user_id().as_str()).collect();
        assert_eq!(names, vec!["ana", "ben"]);
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let store = Arc::new(InMemoryStudyStore::new());
        let handler = ListSessionParticipantsHandler::new(store.clone(), store);
        let missing = SessionId::new();

        let result = handler
            .handle(ListSessionParticipantsQuery {
                session_id: missing,
            })
            .await;
        assert_eq!(result, Err(SessionError::NotFound(missing)));
    }
}
