//! ListHostSessionsHandler - Query handler for sessions a user hosts.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::session::{SessionError, StudySession};
use crate::ports::SessionRepository;

/// Query for one host's sessions.
#[derive(Debug, Clone)]
pub struct ListHostSessionsQuery {
    pub host_id: UserId,
}

/// Handler for listing a host's sessions, ordered by date.
pub struct ListHostSessionsHandler {
    repository: Arc<dyn SessionRepository>,
}

impl ListHostSessionsHandler {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: ListHostSessionsQuery,
    ) -> Result<Vec<StudySession>, SessionError> {
        Ok(self.repository.find_by_host(&query.host_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStudyStore;
    use crate::application::handlers::test_support::{session_on, user};
    use chrono::NaiveDate;

    #[tokio::test]
    async fn lists_only_the_hosts_sessions_in_date_order() {
        let date = |d| NaiveDate::from_ymd_opt(2025, 4, d).unwrap();
        let store = Arc::new(InMemoryStudyStore::with_sessions(vec![
            session_on("alice", "Second", date(20), 3),
            session_on("bob", "Other", date(1), 3),
            session_on("alice", "First", date(2), 3),
        ]));
        let handler = ListHostSessionsHandler::new(store);

        let sessions = handler
            .handle(ListHostSessionsQuery {
                host_id: user("alice"),
            })
            .await
            .unwrap();

        let subjects: Vec<&str> = sessions.iter().map(|s| s.subject()).collect();
        assert_eq!(subjects, vec!["First", "Second"]);
    }

    #[tokio::test]
    async fn host_without_sessions_gets_empty_list() {
        let handler = ListHostSessionsHandler::new(Arc::new(InMemoryStudyStore::new()));
        let sessions = handler
            .handle(ListHostSessionsQuery {
                host_id: user("nobody"),
            })
            .await
            .unwrap();
        assert!(sessions.is_empty());
    }
}
