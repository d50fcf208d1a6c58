//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod participant;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;

pub use participant::{
    ListSessionParticipantsHandler, ListSessionParticipantsQuery, ListUserRequestsHandler,
    ListUserRequestsQuery, RequestToJoinCommand, RequestToJoinHandler, RespondToRequestCommand,
    RespondToRequestHandler,
};
pub use session::{
    CreateSessionCommand, CreateSessionHandler, GetSessionHandler, GetSessionQuery,
    ListHostSessionsHandler, ListHostSessionsQuery, ListUpcomingSessionsHandler,
    SearchSessionsHandler, SearchSessionsQuery,
};
