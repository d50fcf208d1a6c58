//! Session repository port.
//!
//! Defines the contract for persisting and querying study sessions.
//! Sessions are always returned with their participants attached.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::foundation::{DomainError, SessionId, UserId};
use crate::domain::search::{SessionFilters, SessionSearchResult};
use crate::domain::session::StudySession;

/// Repository port for study sessions.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Save a new session.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, session: &StudySession) -> Result<(), DomainError>;

    /// Find a session by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<StudySession>, DomainError>;

    /// Sessions satisfying every supplied filter.
    ///
    /// When the filters carry a viewer location each result carries its
    /// distance. Results are in no particular order.
    async fn find_by_filters(
        &self,
        filters: &SessionFilters,
    ) -> Result<Vec<SessionSearchResult>, DomainError>;

    /// Sessions hosted by a user, ordered by date then start time.
    async fn find_by_host(&self, host_id: &UserId) -> Result<Vec<StudySession>, DomainError>;

    /// Sessions on or after `from`, ordered by date then start time.
    async fn find_upcoming(&self, from: NaiveDate) -> Result<Vec<StudySession>, DomainError>;
}
