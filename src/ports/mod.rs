//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `SessionRepository` - study sessions, including filtered search
//! - `ParticipantRepository` - join requests against sessions

mod participant_repository;
mod session_repository;

pub use participant_repository::ParticipantRepository;
pub use session_repository::SessionRepository;
