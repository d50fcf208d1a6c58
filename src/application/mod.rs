//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers (write) and query handlers (read) are kept separate.

pub mod handlers;

pub use handlers::{
    // Session handlers
    CreateSessionCommand, CreateSessionHandler, GetSessionHandler, GetSessionQuery,
    ListHostSessionsHandler, ListHostSessionsQuery, ListUpcomingSessionsHandler,
    SearchSessionsHandler, SearchSessionsQuery,
    // Participation handlers
    ListSessionParticipantsHandler, ListSessionParticipantsQuery, ListUserRequestsHandler,
    ListUserRequestsQuery, RequestToJoinCommand, RequestToJoinHandler, RespondToRequestCommand,
    RespondToRequestHandler,
};
