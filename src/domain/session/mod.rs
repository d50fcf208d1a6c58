//! Session domain module.
//!
//! Study sessions, their venues, and the join requests made against them.

mod aggregate;
mod errors;
mod location;
mod participant;

pub use aggregate::{SessionDetails, StudySession, MAX_SUBJECT_LENGTH};
pub use errors::SessionError;
pub use location::{Coordinate, Location};
pub use participant::{Participant, ParticipantStatus};
