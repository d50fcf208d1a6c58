//! HTTP handlers for participation endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::identity::RequireUser;
use crate::adapters::http::session::parse_session_id;
use crate::adapters::http::state::StudyAppState;
use crate::application::{
    ListSessionParticipantsQuery, ListUserRequestsQuery, RequestToJoinCommand,
    RespondToRequestCommand,
};
use crate::domain::foundation::{ParticipantId, UserId};

use super::dto::{ParticipantResponse, RespondToRequestBody};

/// POST /api/sessions/:id/participants - Ask to join a session
pub async fn request_to_join(
    State(state): State<StudyAppState>,
    RequireUser(user_id): RequireUser,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let session_id = parse_session_id(&session_id)?;
    let participant = state
        .request_to_join_handler()
        .handle(RequestToJoinCommand {
            session_id,
            user_id,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(ParticipantResponse::from(participant))))
}

/// GET /api/sessions/:id/participants - A session's join requests
pub async fn list_session_participants(
    State(state): State<StudyAppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let session_id = parse_session_id(&session_id)?;
    let participants = state
        .list_session_participants_handler()
        .handle(ListSessionParticipantsQuery { session_id })
        .await?;
    let response: Vec<ParticipantResponse> =
        participants.iter().map(ParticipantResponse::from).collect();
    Ok(Json(response))
}

/// PATCH /api/participants/:id - Approve or reject a request
pub async fn respond_to_request(
    State(state): State<StudyAppState>,
    Path(participant_id): Path<String>,
    body: Result<Json<RespondToRequestBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let participant_id: ParticipantId = participant_id
        .parse()
        .map_err(|_| ApiError::BadRequest("Invalid participant ID format".to_string()))?;
    let Json(body) = body?;

    let participant = state
        .respond_to_request_handler()
        .handle(RespondToRequestCommand {
            participant_id,
            status: body.status,
        })
        .await?;
    Ok(Json(ParticipantResponse::from(participant)))
}

/// GET /api/users/:id/requests - Join requests a user has made
pub async fn list_user_requests(
    State(state): State<StudyAppState>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = UserId::new(user_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let requests = state
        .list_user_requests_handler()
        .handle(ListUserRequestsQuery { user_id })
        .await?;
    let response: Vec<ParticipantResponse> =
        requests.iter().map(ParticipantResponse::from).collect();
    Ok(Json(response))
}
