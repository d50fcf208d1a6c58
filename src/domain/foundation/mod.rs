//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, the clock abstraction, and error
//! types that form the vocabulary of the study hub domain.

mod clock;
mod errors;
mod ids;
mod timestamp;

pub use clock::{Clock, FixedClock, SystemClock};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ParticipantId, SessionId, UserId};
pub use timestamp::Timestamp;
