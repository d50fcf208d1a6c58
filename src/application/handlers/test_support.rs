//! Shared fixtures for handler tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};

use crate::domain::foundation::{
    Clock, DomainError, ErrorCode, FixedClock, SessionId, Timestamp, UserId,
};
use crate::domain::search::{SessionFilters, SessionSearchResult};
use crate::domain::session::{Coordinate, Location, SessionDetails, StudySession};
use crate::ports::SessionRepository;

/// 2025-03-01 12:00 UTC.
pub fn now() -> Timestamp {
    Timestamp::from_datetime(Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap())
}

pub fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(now()))
}

pub fn user(id: &str) -> UserId {
    UserId::new(id).unwrap()
}

pub fn session_on(host: &str, subject: &str, date: NaiveDate, capacity: u32) -> StudySession {
    StudySession::new(
        SessionId::new(),
        user(host),
        SessionDetails {
            subject: subject.to_string(),
            tags: vec!["study".to_string()],
            date,
            start_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            capacity,
            location: Location::new("Library", Coordinate::new(40.0, -74.0), None).unwrap(),
            description: None,
        },
        now(),
    )
    .unwrap()
}

/// Repository whose every call fails with a database error.
pub struct FailingSessionRepository;

fn failure() -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, "Simulated storage failure")
}

#[async_trait]
impl SessionRepository for FailingSessionRepository {
    async fn save(&self, _session: &StudySession) -> Result<(), DomainError> {
        Err(failure())
    }

    async fn find_by_id(&self, _id: &SessionId) -> Result<Option<StudySession>, DomainError> {
        Err(failure())
    }

    async fn find_by_filters(
        &self,
        _filters: &SessionFilters,
    ) -> Result<Vec<SessionSearchResult>, DomainError> {
        Err(failure())
    }

    async fn find_by_host(&self, _host_id: &UserId) -> Result<Vec<StudySession>, DomainError> {
        Err(failure())
    }

    async fn find_upcoming(&self, _from: NaiveDate) -> Result<Vec<StudySession>, DomainError> {
        Err(failure())
    }
}
