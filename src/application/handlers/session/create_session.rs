//! CreateSessionHandler - Command handler for hosting a new study session.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};

use crate::domain::foundation::{Clock, SessionId, UserId};
use crate::domain::session::{Coordinate, Location, SessionDetails, SessionError, StudySession};
use crate::ports::SessionRepository;

/// Command to create a new session.
#[derive(Debug, Clone)]
pub struct CreateSessionCommand {
    pub host_id: UserId,
    pub subject: String,
    pub tags: Vec<String>,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub capacity: u32,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub place_id: Option<String>,
    pub description: Option<String>,
}

/// Handler for creating sessions.
pub struct CreateSessionHandler {
    repository: Arc<dyn SessionRepository>,
    clock: Arc<dyn Clock>,
}

impl CreateSessionHandler {
    pub fn new(repository: Arc<dyn SessionRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    pub async fn handle(&self, cmd: CreateSessionCommand) -> Result<StudySession, SessionError> {
        let location = Location::new(
            cmd.address,
            Coordinate::new(cmd.latitude, cmd.longitude),
            cmd.place_id,
        )
        .map_err(|e| SessionError::validation(e.field(), e.to_string()))?;

        let session = StudySession::new(
            SessionId::new(),
            cmd.host_id,
            SessionDetails {
                subject: cmd.subject,
                tags: cmd.tags,
                date: cmd.date,
                start_time: cmd.start_time,
                end_time: cmd.end_time,
                capacity: cmd.capacity,
                location,
                description: cmd.description,
            },
            self.clock.now(),
        )?;

        self.repository.save(&session).await?;

        tracing::info!(
            session_id = %session.id(),
            host_id = %session.host_id(),
            "study session created"
        );
        Ok(session)
    }
}
