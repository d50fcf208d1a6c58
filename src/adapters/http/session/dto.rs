//! HTTP DTOs for session endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::adapters::http::participant::ParticipantResponse;
use crate::domain::search::{SessionFilters, SessionSearchResult};
use crate::domain::session::{Location, ParticipantStatus, StudySession};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Venue as supplied by a host.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationRequest {
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub place_id: Option<String>,
}

/// Request to host a new session.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSessionRequest {
    pub subject: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub capacity: u32,
    pub location: LocationRequest,
    #[serde(default)]
    pub description: Option<String>,
}

/// Search request body. Every field is optional.
///
/// Filters may be nested under `filters` or given at the top level; the
/// nested object wins when both are present.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchSessionsRequest {
    #[serde(default)]
    pub filters: Option<SessionFilters>,
    #[serde(flatten)]
    pub top_level_filters: SessionFilters,
    #[serde(default, alias = "rankingType")]
    pub ranking_type: Option<String>,
}

impl SearchSessionsRequest {
    /// The filters this request searches with.
    pub fn into_parts(self) -> (SessionFilters, Option<String>) {
        (
            self.filters.unwrap_or(self.top_level_filters),
            self.ranking_type,
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Detailed session view for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub id: String,
    pub host_id: String,
    pub subject: String,
    pub tags: Vec<String>,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub capacity: u32,
    pub approved_count: usize,
    pub available_spots: i64,
    pub location: Location,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub participants: Vec<ParticipantResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&StudySession> for SessionResponse {
    fn from(session: &StudySession) -> Self {
        Self {
            id: session.id().to_string(),
            host_id: session.host_id().to_string(),
            subject: session.subject().to_string(),
            tags: session.tags().to_vec(),
            date: session.date(),
            start_time: session.start_time(),
            end_time: session.end_time(),
            capacity: session.capacity(),
            approved_count: session.approved_count(),
            available_spots: session.available_spots(),
            location: session.location().clone(),
            description: session.description().map(str::to_string),
            participants: session.participants().iter().map(ParticipantResponse::from).collect(),
            created_at: *session.created_at().as_datetime(),
            updated_at: *session.updated_at().as_datetime(),
        }
    }
}

impl From<StudySession> for SessionResponse {
    fn from(session: StudySession) -> Self {
        Self::from(&session)
    }
}

/// One ranked search hit.
///
/// `participation_status` is omitted for anonymous searches and `null` when
/// a signed-in viewer has not asked to join.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResultResponse {
    #[serde(flatten)]
    pub session: SessionResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevance_score: Option<f64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_present"
    )]
    pub participation_status: Option<Option<ParticipantStatus>>,
}

impl From<SessionSearchResult> for SearchResultResponse {
    fn from(result: SessionSearchResult) -> Self {
        Self {
            session: SessionResponse::from(&result.session),
            distance: result.distance,
            relevance_score: result.relevance_score,
            participation_status: result.participation_status,
        }
    }
}

/// Distinguishes an explicit `null` from an absent field.
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Option<ParticipantStatus>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<ParticipantStatus>::deserialize(deserializer).map(Some)
}
