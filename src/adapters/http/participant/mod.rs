//! HTTP adapter for participation endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{ParticipantResponse, RespondToRequestBody};
pub use routes::participant_router;
