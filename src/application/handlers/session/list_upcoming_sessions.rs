//! ListUpcomingSessionsHandler - Sessions from today onwards.

use std::sync::Arc;

use crate::domain::foundation::Clock;
use crate::domain::session::{SessionError, StudySession};
use crate::ports::SessionRepository;

/// Handler listing sessions dated today or later, soonest first.
pub struct ListUpcomingSessionsHandler {
    repository: Arc<dyn SessionRepository>,
    clock: Arc<dyn Clock>,
}

impl ListUpcomingSessionsHandler {
    pub fn new(repository: Arc<dyn SessionRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    pub async fn handle(&self) -> Result<Vec<StudySession>, SessionError> {
        let today = self.clock.now().date();
        Ok(self.repository.find_upcoming(today).await?)
    }
}
