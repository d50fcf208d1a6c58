//! PostgreSQL implementation of ParticipantRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::foundation::{
    DomainError, ErrorCode, ParticipantId, SessionId, Timestamp, UserId,
};
use crate::domain::session::{Participant, ParticipantStatus};
use crate::ports::ParticipantRepository;

/// PostgreSQL implementation of the ParticipantRepository port.
#[derive(Clone)]
pub struct PostgresParticipantRepository {
    pool: PgPool,
}

impl PostgresParticipantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a join request.
#[derive(Debug, sqlx::FromRow)]
struct ParticipantRow {
    id: Uuid,
    session_id: Uuid,
    user_id: String,
    status: String,
    requested_at: DateTime<Utc>,
    responded_at: Option<DateTime<Utc>>,
}

impl TryFrom<ParticipantRow> for Participant {
    type Error = DomainError;

    fn try_from(row: ParticipantRow) -> Result<Self, Self::Error> {
        let status: ParticipantStatus = row
            .status
            .parse()
            .map_err(|e| DomainError::database("Invalid participant status", e))?;
        let user_id =
            UserId::new(row.user_id).map_err(|e| DomainError::database("Invalid user_id", e))?;

        Ok(Participant::reconstitute(
            ParticipantId::from_uuid(row.id),
            SessionId::from_uuid(row.session_id),
            user_id,
            status,
            Timestamp::from_datetime(row.requested_at),
            row.responded_at.map(Timestamp::from_datetime),
        ))
    }
}

/// Decodes a participant row fetched by another adapter query.
pub(super) fn row_to_participant(row: &PgRow) -> Result<Participant, DomainError> {
    ParticipantRow::from_row(row)
        .map_err(|e| DomainError::database("Failed to decode participant", e))?
        .try_into()
}

#[async_trait]
impl ParticipantRepository for PostgresParticipantRepository {
    async fn save(&self, participant: &Participant) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO session_participants (
                id, session_id, user_id, status, requested_at, responded_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(participant.id().as_uuid())
        .bind(participant.session_id().as_uuid())
        .bind(participant.user_id().as_str())
        .bind(participant.status().as_str())
        .bind(participant.requested_at().as_datetime())
        .bind(participant.responded_at().map(|t| *t.as_datetime()))
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(DomainError::new(
                    ErrorCode::AlreadyRequested,
                    "Already requested to join this session",
                ))
            }
            Err(sqlx::Error::Database(db_err)) if db_err.is_foreign_key_violation() => {
                Err(DomainError::new(
                    ErrorCode::SessionNotFound,
                    format!("Session not found: {}", participant.session_id()),
                ))
            }
            Err(e) => Err(DomainError::database("Failed to insert join request", e)),
        }
    }

    async fn update(&self, participant: &Participant) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to start transaction", e))?;

        // Locking the session row serializes answers per session, so the
        // approved count read below cannot go stale before the write.
        let current: Option<(String, i32)> = sqlx::query_as(
            r#"
            SELECT p.status, s.capacity
            FROM session_participants p
            JOIN study_sessions s ON s.id = p.session_id
            WHERE p.id = $1
            FOR UPDATE OF s
            "#,
        )
        .bind(participant.id().as_uuid())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| DomainError::database("Failed to lock session", e))?;

        let Some((current_status, capacity)) = current else {
            return Err(DomainError::new(
                ErrorCode::ParticipantNotFound,
                format!("Participant not found: {}", participant.id()),
            ));
        };

        if participant.is_approved() && current_status != ParticipantStatus::Approved.as_str() {
            let (approved,): (i64,) = sqlx::query_as(
                r#"
                SELECT count(*) FROM session_participants
                WHERE session_id = $1 AND status = 'approved'
                "#,
            )
            .bind(participant.session_id().as_uuid())
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to count approved participants", e))?;

            if approved >= i64::from(capacity) {
                return Err(DomainError::new(
                    ErrorCode::SessionFull,
                    "Session has no spots left",
                ));
            }
        }

        sqlx::query(
            r#"
            UPDATE session_participants SET
                status = $2,
                responded_at = $3
            WHERE id = $1
            "#,
        )
        .bind(participant.id().as_uuid())
        .bind(participant.status().as_str())
        .bind(participant.responded_at().map(|t| *t.as_datetime()))
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database("Failed to update join request", e))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit join request", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &ParticipantId) -> Result<Option<Participant>, DomainError> {
        let row: Option<ParticipantRow> = sqlx::query_as(
            r#"
            SELECT id, session_id, user_id, status, requested_at, responded_at
            FROM session_participants
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch join request", e))?;

        row.map(Participant::try_from).transpose()
    }

    async fn find_by_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<Participant>, DomainError> {
        let rows: Vec<ParticipantRow> = sqlx::query_as(
            r#"
            SELECT id, session_id, user_id, status, requested_at, responded_at
            FROM session_participants
            WHERE session_id = $1
            ORDER BY requested_at ASC
            "#,
        )
        .bind(session_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch session participants", e))?;

        rows.into_iter().map(Participant::try_from).collect()
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Participant>, DomainError> {
        let rows: Vec<ParticipantRow> = sqlx::query_as(
            r#"
            SELECT id, session_id, user_id, status, requested_at, responded_at
            FROM session_participants
            WHERE user_id = $1
            ORDER BY requested_at ASC
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch user join requests", e))?;

        rows.into_iter().map(Participant::try_from).collect()
    }
}
