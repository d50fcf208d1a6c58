//! Domain layer - Core business logic and types.
//!
//! Pure types and algorithms with no I/O.

pub mod foundation;
pub mod search;
pub mod session;
