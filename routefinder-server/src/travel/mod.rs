//! Travel time resolution.
//!
//! Given a click location and its nearest candidates, finds the fastest
//! candidate for each transport mode using the routing API's duration
//! matrix. Matrix responses are cached per (mode, origin, destinations).

mod cache;
mod format;
mod resolver;

pub use cache::{CachePolicy, DurationRow, MatrixKey, TravelTimeCache};
pub use format::format_duration;
pub use resolver::{DurationSource, TravelResult, TravelTimeResolver, fastest_index};
