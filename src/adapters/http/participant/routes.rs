//! Route configuration for participation endpoints.

use axum::routing::{get, patch};
use axum::Router;

use super::handlers::{
    list_session_participants, list_user_requests, request_to_join, respond_to_request,
};
use crate::adapters::http::state::StudyAppState;

/// Creates the participation router.
///
/// Routes:
/// - `GET /api/sessions/:id/participants` - Join requests on a session
/// - `POST /api/sessions/:id/participants` - Ask to join
/// - `PATCH /api/participants/:id` - Approve or reject
/// - `GET /api/users/:id/requests` - A user's join requests
pub fn participant_router() -> Router<StudyAppState> {
    Router::new()
        .route(
            "/api/sessions/:id/participants",
            get(list_session_participants).post(request_to_join),
        )
        .route("/api/participants/:id", patch(respond_to_request))
        .route("/api/users/:id/requests", get(list_user_requests))
}
