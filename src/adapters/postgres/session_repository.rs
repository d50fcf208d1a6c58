//! PostgreSQL implementation of SessionRepository.
//!
//! Sessions live in `study_sessions`; their join requests are loaded from
//! `session_participants` in a second query and attached to each aggregate.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use super::participant_repository::row_to_participant;
use super::column;
use crate::domain::foundation::{DomainError, SessionId, Timestamp, UserId};
use crate::domain::search::{filters, SessionFilters, SessionSearchResult};
use crate::domain::session::{Location, Participant, SessionDetails, StudySession};
use crate::ports::SessionRepository;

const SESSION_COLUMNS: &str = r#"
    id, host_id, subject, tags, date, start_time, end_time, capacity,
    address, latitude, longitude, place_id, description, created_at, updated_at
"#;

/// PostgreSQL implementation of SessionRepository.
#[derive(Clone)]
pub struct PostgresSessionRepository {
    pool: PgPool,
}

impl PostgresSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Turns session rows into aggregates with their participants attached.
    async fn hydrate(&self, rows: Vec<PgRow>) -> Result<Vec<StudySession>, DomainError> {
        let ids: Vec<Uuid> = rows
            .iter()
            .map(|row| column::<Uuid>(row, "id"))
            .collect::<Result<_, _>>()?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let participant_rows = sqlx::query(
            r#"
            SELECT id, session_id, user_id, status, requested_at, responded_at
            FROM session_participants
            WHERE session_id = ANY($1)
            ORDER BY requested_at ASC
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch session participants", e))?;

        let mut by_session: HashMap<SessionId, Vec<Participant>> = HashMap::new();
        for row in participant_rows {
            let participant = row_to_participant(&row)?;
            by_session
                .entry(participant.session_id())
                .or_default()
                .push(participant);
        }

        rows.iter()
            .map(|row| {
                let id = SessionId::from_uuid(column(row, "id")?);
                let participants = by_session.remove(&id).unwrap_or_default();
                row_to_session(row, participants)
            })
            .collect()
    }
}

#[async_trait]
impl SessionRepository for PostgresSessionRepository {
    async fn save(&self, session: &StudySession) -> Result<(), DomainError> {
        let location = session.location();
        let capacity = i32::try_from(session.capacity())
            .map_err(|e| DomainError::database("Capacity out of range", e))?;
        sqlx::query(
            r#"
            INSERT INTO study_sessions (
                id, host_id, subject, tags, date, start_time, end_time, capacity,
                address, latitude, longitude, place_id, description, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(session.host_id().as_str())
        .bind(session.subject())
        .bind(session.tags())
        .bind(session.date())
        .bind(session.start_time())
        .bind(session.end_time())
        .bind(capacity)
        .bind(&location.address)
        .bind(location.latitude)
        .bind(location.longitude)
        .bind(location.place_id.as_deref())
        .bind(session.description())
        .bind(session.created_at().as_datetime())
        .bind(session.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to insert session", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<StudySession>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM study_sessions WHERE id = $1",
            SESSION_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch session", e))?;

        match row {
            Some(row) => Ok(self.hydrate(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn find_by_filters(
        &self,
        filters: &SessionFilters,
    ) -> Result<Vec<SessionSearchResult>, DomainError> {
        // Only the date runs in SQL. Postgres `lower()` folds case per the
        // database collation, so text matching stays in Rust.
        let rows = sqlx::query(&format!(
            "SELECT {} FROM study_sessions WHERE ($1::date IS NULL OR date = $1)",
            SESSION_COLUMNS
        ))
        .bind(filters.date)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to search sessions", e))?;

        let sessions = self.hydrate(rows).await?;
        Ok(filters::apply_distance(
            match_text(sessions, filters),
            filters,
        ))
    }

    async fn find_by_host(&self, host_id: &UserId) -> Result<Vec<StudySession>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM study_sessions WHERE host_id = $1 ORDER BY date, start_time, id",
            SESSION_COLUMNS
        ))
        .bind(host_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch sessions by host", e))?;

        self.hydrate(rows).await
    }

    async fn find_upcoming(&self, from: NaiveDate) -> Result<Vec<StudySession>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM study_sessions WHERE date >= $1 ORDER BY date, start_time, id",
            SESSION_COLUMNS
        ))
        .bind(from)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch upcoming sessions", e))?;

        self.hydrate(rows).await
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn row_to_session(row: &PgRow, participants: Vec<Participant>) -> Result<StudySession, DomainError> {
    let host_id: String = column(row, "host_id")?;
    let capacity: i32 = column(row, "capacity")?;

    let details = SessionDetails {
        subject: column(row, "subject")?,
        tags: column(row, "tags")?,
        date: column::<NaiveDate>(row, "date")?,
        start_time: column::<NaiveTime>(row, "start_time")?,
        end_time: column::<NaiveTime>(row, "end_time")?,
        capacity: u32::try_from(capacity)
            .map_err(|e| DomainError::database("Invalid capacity", e))?,
        location: Location {
            address: column(row, "address")?,
            latitude: column(row, "latitude")?,
            longitude: column(row, "longitude")?,
            place_id: column(row, "place_id")?,
        },
        description: column(row, "description")?,
    };

    Ok(StudySession::reconstitute(
        SessionId::from_uuid(column(row, "id")?),
        UserId::new(host_id).map_err(|e| DomainError::database("Invalid host_id", e))?,
        details,
        Timestamp::from_datetime(column(row, "created_at")?),
        Timestamp::from_datetime(column(row, "updated_at")?),
        participants,
    ))
}

/// Subject and tag predicates for sessions already narrowed by date.
fn match_text(sessions: Vec<StudySession>, filters: &SessionFilters) -> Vec<SessionSearchResult> {
    sessions
        .into_iter()
        .filter(|s| filters::matches_subject(s, filters) && filters::matches_tags(s, filters))
        .map(SessionSearchResult::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session::Coordinate;

    fn session(subject: &str, tags: &[&str]) -> StudySession {
        StudySession::new(
            SessionId::new(),
            UserId::new("host").unwrap(),
            SessionDetails {
                subject: subject.to_string(),
                tags: tags.iter().map(|t| t.to_string()).collect(),
                date: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
                start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
                capacity: 3,
                location: Location::new("Library", Coordinate::new(40.0, -74.0), None).unwrap(),
                description: None,
            },
            Timestamp::now(),
        )
        .unwrap()
    }

    #[test]
    fn text_matching_folds_non_ascii_case() {
        let filters = SessionFilters {
            subject: Some("ÉCOLOGIE".to_string()),
            tags: Some(vec!["ÖKONOMIE".to_string()]),
            ..Default::default()
        };
        let sessions = vec![
            session("Écologie urbaine", &["ökonomie"]),
            session("Écologie urbaine", &["biologie"]),
            session("Économie", &["ökonomie"]),
        ];

        let matched = match_text(sessions, &filters);

        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].session.tags(), &["ökonomie".to_string()]);
    }

    #[test]
    fn text_matching_without_filters_keeps_everything() {
        let sessions = vec![session("Physics", &[]), session("Chemistry", &["lab"])];
        assert_eq!(match_text(sessions, &SessionFilters::default()).len(), 2);
    }
}
