//! HTTP adapter for session endpoints.

mod dto;
mod handlers;
mod routes;

pub(crate) use handlers::parse_session_id;

pub use dto::{
    CreateSessionRequest, LocationRequest, SearchResultResponse, SearchSessionsRequest,
    SessionResponse,
};
pub use routes::session_router;
