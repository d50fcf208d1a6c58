//! In-memory storage adapter.
//!
//! Used when no database is configured and throughout the test suite.
//! Sessions own their participants, so one store implements both
//! repository ports.

mod store;

pub use store::InMemoryStudyStore;
