//! Sliding window rate limiting
//!
//! A process-local limiter keyed by caller identity. Each key holds the
//! timestamps of its admitted requests inside the trailing window; the number
//! of distinct keys is bounded, and a background task compacts stale keys.

mod limiter;
mod types;
mod utils;


pub use limiter::RateLimiter;
pub use types::RateLimitDecision;
