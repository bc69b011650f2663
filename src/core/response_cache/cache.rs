//! Response cache implementation

use super::types::{CacheEntry, CacheKey, CacheStats, CachedResponse};
use crate::config::models::cache::CacheConfig;
use dashmap::DashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::debug;

/// Process-local TTL cache for handler responses
///
/// Writes are single map insertions of a fully built entry, so a reader sees
/// either the previous state or the complete new response.
pub struct ResponseCache {
    entries: DashMap<CacheKey, CacheEntry>,
    config: CacheConfig,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ResponseCache {
    /// Create a new response cache
    pub fn new(config: CacheConfig) -> Self {
        Self {
            entries: DashMap::new(),
            config,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Whether caching is switched on for this process
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Get a live cached response. Expired entries are treated as absent and removed.
    pub fn get(&self, key: &CacheKey) -> Option<Arc<CachedResponse>> {
        let now = Instant::now();

        let expired = match self.entries.get(key) {
            Some(entry) if !entry.is_expired(now) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!("Cache hit for key: {}", key);
                return Some(Arc::clone(&entry.response));
            }
            Some(_) => true,
            None => false,
        };

        // The read guard above is released before touching the shard again
        if expired {
            self.entries.remove_if(key, |_, entry| entry.is_expired(now));
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Store a response for `ttl`. Returns whether the entry was stored.
    pub fn insert(&self, key: CacheKey, response: CachedResponse, ttl: Duration) -> bool {
        if !self.config.enabled || ttl.is_zero() {
            return false;
        }

        if self.entries.len() >= self.config.max_entries && !self.entries.contains_key(&key) {
            self.sweep();
            if self.entries.len() >= self.config.max_entries {
                debug!(
                    max_entries = self.config.max_entries,
                    "Response cache full, not caching {}", key
                );
                return false;
            }
        }

        debug!("Cached response for key: {} (ttl {:?})", key, ttl);
        self.entries
            .insert(key, CacheEntry::new(response, ttl, Instant::now()));
        true
    }

    /// Remove every expired entry, returning how many were removed
    pub fn sweep(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        before.saturating_sub(self.entries.len())
    }

    /// Start the background expiry sweep
    ///
    /// The task only holds a weak reference and stops once the cache is dropped.
    pub fn start_sweep_task(self: &Arc<Self>) -> JoinHandle<()> {
        let cache = Arc::downgrade(self);
        let period = self.config.sweep_interval();

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            interval.tick().await;

            loop {
                interval.tick().await;
                let Some(cache) = cache.upgrade() else {
                    break;
                };
                let removed = cache.sweep();
                if removed > 0 {
                    debug!(removed, "Swept expired response cache entries");
                }
            }
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            size_bytes: self
                .entries
                .iter()
                .map(|entry| entry.response.size_bytes())
                .sum(),
        }
    }
}
