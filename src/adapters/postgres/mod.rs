//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresSessionRepository` - sessions, with attribute filters pushed into SQL
//! - `PostgresParticipantRepository` - join requests
//!
//! Schema lives in `migrations/`.

mod participant_repository;
mod session_repository;

pub use participant_repository::PostgresParticipantRepository;
pub use session_repository::PostgresSessionRepository;

use sqlx::postgres::PgRow;
use sqlx::Row;

use crate::domain::foundation::DomainError;

/// Reads a typed column, mapping decode failures to a database error.
fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name)
        .map_err(|e| DomainError::database(&format!("Failed to get {}", name), e))
}
