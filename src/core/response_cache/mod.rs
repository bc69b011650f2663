//! Short-term response cache
//!
//! A TTL cache for serialized handler responses. Each entry carries its own
//! expiry, checked lazily on read and periodically by a background sweep.
//! Entries live only for the lifetime of the process.

mod cache;
mod types;


pub use cache::ResponseCache;
pub use types::{CacheKey, CacheScope, CacheStats, CachedResponse};
