//! Map-backed implementation of the session and participant ports.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::foundation::{DomainError, ErrorCode, ParticipantId, SessionId, UserId};
use crate::domain::search::{filters, SessionFilters, SessionSearchResult};
use crate::domain::session::{Participant, StudySession};
use crate::ports::{ParticipantRepository, SessionRepository};

/// Sessions keyed by id, each carrying its participants.
#[derive(Default)]
pub struct InMemoryStudyStore {
    sessions: RwLock<HashMap<SessionId, StudySession>>,
}

impl InMemoryStudyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with sessions.
    pub fn with_sessions(sessions: impl IntoIterator<Item = StudySession>) -> Self {
        let map = sessions
            .into_iter()
            .map(|session| (*session.id(), session))
            .collect();
        Self {
            sessions: RwLock::new(map),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<SessionId, StudySession>>, DomainError> {
        self.sessions
            .read()
            .map_err(|_| DomainError::new(ErrorCode::InternalError, "Session store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<SessionId, StudySession>>, DomainError> {
        self.sessions
            .write()
            .map_err(|_| DomainError::new(ErrorCode::InternalError, "Session store lock poisoned"))
    }

    fn sorted(mut sessions: Vec<StudySession>) -> Vec<StudySession> {
        sessions.sort_by(|a, b| {
            a.date()
                .cmp(&b.date())
                .then_with(|| a.start_time().cmp(&b.start_time()))
                .then_with(|| a.id().cmp(b.id()))
        });
        sessions
    }

    fn sorted_participants(mut participants: Vec<Participant>) -> Vec<Participant> {
        participants.sort_by(|a, b| a.requested_at().cmp(b.requested_at()));
        participants
    }
}

#[async_trait]
impl SessionRepository for InMemoryStudyStore {
    async fn save(&self, session: &StudySession) -> Result<(), DomainError> {
        self.write()?.insert(*session.id(), session.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<StudySession>, DomainError> {
        Ok(self.read()?.get(id).cloned())
    }

    async fn find_by_filters(
        &self,
        filters: &SessionFilters,
    ) -> Result<Vec<SessionSearchResult>, DomainError> {
        // Snapshot first so the lock is not held while evaluating.
        let snapshot: Vec<StudySession> = self.read()?.values().cloned().collect();
        Ok(filters::evaluate(snapshot, filters))
    }

    async fn find_by_host(&self, host_id: &UserId) -> Result<Vec<StudySession>, DomainError> {
        let hosted = self
            .read()?
            .values()
            .filter(|s| s.host_id() == host_id)
            .cloned()
            .collect();
        Ok(Self::sorted(hosted))
    }

    async fn find_upcoming(&self, from: NaiveDate) -> Result<Vec<StudySession>, DomainError> {
        let upcoming = self
            .read()?
            .values()
            .filter(|s| s.date() >= from)
            .cloned()
            .collect();
        Ok(Self::sorted(upcoming))
    }
}

#[async_trait]
impl ParticipantRepository for InMemoryStudyStore {
    async fn save(&self, participant: &Participant) -> Result<(), DomainError> {
        let mut sessions = self.write()?;
        let session = sessions.get_mut(&participant.session_id()).ok_or_else(|| {
            DomainError::new(
                ErrorCode::SessionNotFound,
                format!("Session not found: {}", participant.session_id()),
            )
        })?;
        session.add_participant(participant.clone())
    }

    async fn update(&self, participant: &Participant) -> Result<(), DomainError> {
        let mut sessions = self.write()?;
        let session = sessions.get_mut(&participant.session_id()).ok_or_else(|| {
            DomainError::new(
                ErrorCode::ParticipantNotFound,
                format!("Participant not found: {}", participant.id()),
            )
        })?;
        session.replace_participant(participant.clone())
    }

    async fn find_by_id(&self, id: &ParticipantId) -> Result<Option<Participant>, DomainError> {
        Ok(self
            .read()?
            .values()
            .flat_map(|s| s.participants())
            .find(|p| p.id() == *id)
            .cloned())
    }

    async fn find_by_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<Participant>, DomainError> {
        let participants = self
            .read()?
            .get(session_id)
            .map(|s| s.participants().to_vec())
            .unwrap_or_default();
        Ok(Self::sorted_participants(participants))
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Participant>, DomainError> {
        let participants = self
            .read()?
            .values()
            .flat_map(|s| s.participants())
            .filter(|p| p.user_id() == user_id)
            .cloned()
            .collect();
        Ok(Self::sorted_participants(participants))
    }
}
