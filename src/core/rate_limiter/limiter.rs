//! Core rate limiter implementation

use super::types::{KeyHistory, RateLimitDecision};
use crate::config::Validate;
use crate::config::models::rate_limit::RateLimitConfig;
use crate::utils::error::{GatewayError, Result};
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Sliding window rate limiter
///
/// All state sits behind one mutex, so the prune, decide and append steps of
/// [`check`](Self::check) are atomic with respect to every other check and to
/// compaction. The guard is never held across an await point.
///
/// When a new key arrives and `max_tracked_keys` keys are already tracked,
/// the earliest-registered key is evicted. The history map is only touched
/// through non-promoting accessors, so "least recently used" in the backing
/// `LruCache` means "registered first", not "checked least recently". This is
/// a soft memory bound, not a fairness guarantee: an evicted caller starts
/// over with an empty window.
pub struct RateLimiter {
    /// Rate limit configuration
    pub(super) config: RateLimitConfig,
    /// Window duration
    pub(super) window: Duration,
    /// Request history by caller key, in registration order
    pub(super) histories: Mutex<LruCache<String, KeyHistory>>,
}

impl RateLimiter {
    /// Create a new rate limiter
    pub fn new(config: RateLimitConfig) -> Result<Self> {
        config.validate().map_err(GatewayError::Config)?;
        let capacity = NonZeroUsize::new(config.max_tracked_keys).ok_or_else(|| {
            GatewayError::Config("max_tracked_keys must be greater than 0".to_string())
        })?;

        Ok(Self {
            window: config.window(),
            histories: Mutex::new(LruCache::new(capacity)),
            config,
        })
    }

    /// Decide whether `key` may make another request under `limit` requests
    /// per window, recording the request when it is allowed.
    ///
    /// A rejected call leaves the key's history untouched apart from pruning.
    pub fn check(&self, key: &str, limit: u32) -> RateLimitDecision {
        if limit == 0 {
            return RateLimitDecision::Rejected {
                limit,
                retry_after: self.window,
            };
        }

        let now = Instant::now();
        let mut histories = self.histories.lock();

        if let Some(history) = histories.peek_mut(key) {
            history.prune(now, self.window);

            let current = history.len();
            if current >= limit as usize {
                let retry_after = history.reset_after(now, self.window);
                debug!(
                    "Rate limit exceeded for {}: {}/{} requests",
                    key, current, limit
                );
                return RateLimitDecision::Rejected { limit, retry_after };
            }

            history.record(now);
            return RateLimitDecision::Allowed {
                remaining: limit - current as u32 - 1,
                reset_after: history.reset_after(now, self.window),
            };
        }

        let mut history = KeyHistory::default();
        history.record(now);
        if let Some((evicted, _)) = histories.push(key.to_string(), history) {
            debug!(
                evicted = %evicted,
                capacity = self.config.max_tracked_keys,
                "Rate limiter at capacity, evicted earliest-registered key"
            );
        }

        RateLimitDecision::Allowed {
            remaining: limit - 1,
            reset_after: self.window,
        }
    }

    /// Sliding window length
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Limiter configuration
    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }
}
