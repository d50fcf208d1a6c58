//! Campus Study Hub - study session marketplace
//!
//! Students host study sessions at campus venues and ask to join sessions
//! hosted by others. Discovery filters sessions by subject, tags, date and
//! distance, ranks them with a pluggable strategy, and tells the viewer
//! where they stand with each one.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
