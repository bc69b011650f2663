//! Core gateway state
//!
//! The two process-local components every guarded route shares: the sliding
//! window rate limiter and the short-term response cache.

pub mod rate_limiter;
pub mod response_cache;
