//! Participant repository port.
//!
//! Join requests are stored alongside their session. Callers enforce the
//! one-request-per-(session, user) rule before calling `save`.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ParticipantId, SessionId, UserId};
use crate::domain::session::Participant;

/// Repository port for join requests.
#[async_trait]
pub trait ParticipantRepository: Send + Sync {
    /// Save a new join request.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if the session doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn save(&self, participant: &Participant) -> Result<(), DomainError>;

    /// Persist a changed status / response time.
    ///
    /// # Errors
    ///
    /// - `ParticipantNotFound` if the request doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, participant: &Participant) -> Result<(), DomainError>;

    /// Find a join request by its ID.
    async fn find_by_id(&self, id: &ParticipantId) -> Result<Option<Participant>, DomainError>;

    /// All requests against a session, oldest first.
    async fn find_by_session(&self, session_id: &SessionId)
        -> Result<Vec<Participant>, DomainError>;

    /// All requests a user has made, oldest first.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Participant>, DomainError>;
}
