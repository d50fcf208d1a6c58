//! Route configuration for session endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    create_session, get_session, list_host_sessions, list_upcoming_sessions, search_sessions,
};
use crate::adapters::http::state::StudyAppState;

/// Creates the session router.
///
/// Routes:
/// - `POST /api/sessions/search` - Filtered, ranked discovery
/// - `GET /api/sessions` - Upcoming sessions
/// - `POST /api/sessions` - Host a session
/// - `GET /api/sessions/:id` - Session details
/// - `GET /api/users/:id/sessions` - Sessions a user hosts
pub fn session_router() -> Router<StudyAppState> {
    Router::new()
        .route("/api/sessions/search", post(search_sessions))
        .route(
            "/api/sessions",
            get(list_upcoming_sessions).post(create_session),
        )
        .route("/api/sessions/:id", get(get_session))
        .route("/api/users/:id/sessions", get(list_host_sessions))
}
