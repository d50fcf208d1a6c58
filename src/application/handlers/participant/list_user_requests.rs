//! ListUserRequestsHandler - Join requests a user has made.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::session::{Participant, SessionError};
use crate::ports::ParticipantRepository;

/// Query for one user's join requests.
#[derive(Debug, Clone)]
pub struct ListUserRequestsQuery {
    pub user_id: UserId,
}

pub struct ListUserRequestsHandler {
    participants: Arc<dyn ParticipantRepository>,
}

impl ListUserRequestsHandler {
    pub fn new(participants: Arc<dyn ParticipantRepository>) -> Self {
        Self { participants }
    }

    pub async fn handle(
        &self,
        query: ListUserRequestsQuery,
    ) -> Result<Vec<Participant>, SessionError> {
        Ok(self.participants.find_by_user(&query.user_id).await?)
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
    async fn collects_requests_across_sessions() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();
        let mut first = session_on("host", "History", date, 3);
        let mut second = session_on("host", "Geography", date, 3);
        let untouched = session_on("host", "Art", date, 3);
        for session in [&mut first, &mut second] {
            let id = *session.id();
            session
                .add_participant(Participant::request(id, user("dana"), Timestamp::now()))
                .unwrap();
        }
        let store = Arc::new(InMemoryStudyStore::with_sessions(vec![first, second, untouched]));
        let handler = ListUserRequestsHandler::new(store);

        let requests = handler
            .handle(ListUserRequestsQuery {
                user_id: user("dana"),
            })
            .await
            .unwrap();

        assert_eq!(requests.len(), 2);
        assert!(requests.iter().all(|p| p.user_id().as_str() == "dana"));
    }

    #[tokio::test]
    async fn user_without_requests_gets_empty_list() {
        let handler = ListUserRequestsHandler::new(Arc::new(InMemoryStudyStore::new()));
        let requests = handler
            .handle(ListUserRequestsQuery {
                user_id: user("nobody"),
            })
            .await
            .unwrap();
        assert!(requests.is_empty());
    }
}
