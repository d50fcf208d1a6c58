//! HTTP handlers for session endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::identity::{OptionalViewer, RequireUser};
use crate::adapters::http::state::StudyAppState;
use crate::application::{
    CreateSessionCommand, GetSessionQuery, ListHostSessionsQuery, SearchSessionsQuery,
};
use crate::domain::foundation::{SessionId, UserId};

use super::dto::{CreateSessionRequest, SearchResultResponse, SearchSessionsRequest, SessionResponse};

pub(crate) fn parse_session_id(raw: &str) -> Result<SessionId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest("Invalid session ID format".to_string()))
}

/// POST /api/sessions/search - Filtered, ranked discovery
pub async fn search_sessions(
    State(state): State<StudyAppState>,
    OptionalViewer(viewer): OptionalViewer,
    body: Result<Json<SearchSessionsRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body?;
    let (filters, ranking_type) = req.into_parts();
    let query = SearchSessionsQuery {
        filters,
        ranking_type,
        viewer,
    };

    let results = state.search_handler().handle(query).await?;
    let response: Vec<SearchResultResponse> =
        results.into_iter().map(SearchResultResponse::from).collect();
    Ok(Json(response))
}

/// GET /api/sessions - Upcoming sessions
pub async fn list_upcoming_sessions(
    State(state): State<StudyAppState>,
) -> Result<impl IntoResponse, ApiError> {
    let sessions = state.list_upcoming_handler().handle().await?;
    let response: Vec<SessionResponse> = sessions.into_iter().map(SessionResponse::from).collect();
    Ok(Json(response))
}

/// POST /api/sessions - Host a new session
pub async fn create_session(
    State(state): State<StudyAppState>,
    RequireUser(host_id): RequireUser,
    body: Result<Json<CreateSessionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body?;
    let cmd = CreateSessionCommand {
        host_id,
        subject: req.subject,
        tags: req.tags,
        date: req.date,
        start_time: req.start_time,
        end_time: req.end_time,
        capacity: req.capacity,
        address: req.location.address,
        latitude: req.location.latitude,
        longitude: req.location.longitude,
        place_id: req.location.place_id,
        description: req.description,
    };

    let session = state.create_session_handler().handle(cmd).await?;
    Ok((StatusCode::CREATED, Json(SessionResponse::from(session))))
}

/// GET /api/sessions/:id - Session details with participants
pub async fn get_session(
    State(state): State<StudyAppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let session_id = parse_session_id(&session_id)?;
    let session = state
        .get_session_handler()
        .handle(GetSessionQuery { session_id })
        .await?;
    Ok(Json(SessionResponse::from(session)))
}

/// GET /api/users/:id/sessions - Sessions hosted by a user
pub async fn list_host_sessions(
    State(state): State<StudyAppState>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let host_id =
        UserId::new(user_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let sessions = state
        .list_host_sessions_handler()
        .handle(ListHostSessionsQuery { host_id })
        .await?;
    let response: Vec<SessionResponse> = sessions.into_iter().map(SessionResponse::from).collect();
    Ok(Json(response))
}
