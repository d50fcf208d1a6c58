//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - REST API over axum
//! - `memory` - process-local store used without a database and in tests
//! - `postgres` - sqlx-backed repositories

pub mod http;
pub mod memory;
pub mod postgres;

pub use memory::InMemoryStudyStore;
pub use postgres::{PostgresParticipantRepository, PostgresSessionRepository};
