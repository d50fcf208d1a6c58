//! Session discovery.
//!
//! A search runs three strictly sequential, pure stages over sessions
//! already loaded by a repository:
//!
//! 1. filter: [`filters::evaluate`] (or an adapter's split equivalent)
//! 2. rank: [`RankingStrategy::rank`]
//! 3. annotate: [`annotate_participation`]
//!
//! Nothing here performs I/O or touches shared state.

pub mod distance;
pub mod filters;
mod participation;
mod ranking;
mod result;

pub use distance::{haversine_km, EARTH_RADIUS_KM};
pub use filters::SessionFilters;
pub use participation::annotate_participation;
pub use ranking::RankingStrategy;
pub use result::SessionSearchResult;
