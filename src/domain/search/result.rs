//! A session as seen by one search request.

use crate::domain::session::{ParticipantStatus, StudySession};

/// A session plus the request-scoped fields derived while searching.
///
/// None of the derived fields are ever persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSearchResult {
    pub session: StudySession,

    /// Kilometres from the viewer. Present only when the viewer supplied a
    /// location.
    pub distance: Option<f64>,

    /// Score assigned by the ranking stage.
    pub relevance_score: Option<f64>,

    /// The viewer's own join-request status.
    ///
    /// `None` means the viewer is anonymous and nothing was looked up;
    /// `Some(None)` means the viewer has never asked to join.
    pub participation_status: Option<Option<ParticipantStatus>>,
}

impl SessionSearchResult {
    pub fn new(session: StudySession) -> Self {
        Self {
            session,
            distance: None,
            relevance_score: None,
            participation_status: None,
        }
    }

    pub fn with_distance(mut self, distance: f64) -> Self {
        self.distance = Some(distance);
        self
    }
}

impl From<StudySession> for SessionSearchResult {
    fn from(session: StudySession) -> Self {
        Self::new(session)
    }
}
