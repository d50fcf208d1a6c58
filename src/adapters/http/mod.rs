//! HTTP adapters - REST API implementations.
//!
//! Each area has its own HTTP adapter for endpoint exposure. The
//! application binary wraps [`api_router`] in tracing, CORS and timeout
//! layers; tests drive it bare.

mod error;
mod identity;
pub mod participant;
pub mod session;
mod state;

pub use error::{ApiError, ErrorResponse};
pub use identity::{OptionalViewer, RequireUser, USER_ID_HEADER};
pub use state::StudyAppState;

use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

/// GET /health - Liveness probe
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Every endpoint, bound to its state.
pub fn api_router(state: StudyAppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(session::session_router())
        .merge(participant::participant_router())
        .with_state(state)
}
