//! Session command and query handlers.

mod create_session;
mod get_session;
mod list_host_sessions;
mod list_upcoming_sessions;
mod search_sessions;

pub use create_session::{CreateSessionCommand, CreateSessionHandler};
pub use get_session::{GetSessionHandler, GetSessionQuery};
pub use list_host_sessions::{ListHostSessionsHandler, ListHostSessionsQuery};
pub use list_upcoming_sessions::ListUpcomingSessionsHandler;
pub use search_sessions::{SearchSessionsHandler, SearchSessionsQuery};
