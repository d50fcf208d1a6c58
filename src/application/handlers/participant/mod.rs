//! Participation command and query handlers.

mod list_session_participants;
mod list_user_requests;
mod request_to_join;
mod respond_to_request;

pub use list_session_participants::{ListSessionParticipantsHandler, ListSessionParticipantsQuery};
pub use list_user_requests::{ListUserRequestsHandler, ListUserRequestsQuery};
pub use request_to_join::{RequestToJoinCommand, RequestToJoinHandler};
pub use respond_to_request::{RespondToRequestCommand, RespondToRequestHandler};
