//! Compaction and introspection for the rate limiter

use super::limiter::RateLimiter;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::debug;

impl RateLimiter {
    /// Prune every key to the sliding window and drop keys left empty.
    /// Returns the number of keys removed.
    pub fn compact(&self) -> usize {
        let now = Instant::now();
        let mut histories = self.histories.lock();

        let stale: Vec<String> = histories
            .iter_mut()
            .filter_map(|(key, history)| {
                history.prune(now, self.window);
                history.is_empty().then(|| key.clone())
            })
            .collect();

        for key in &stale {
            histories.pop(key);
        }
        stale.len()
    }

    /// Start the background compaction task, one pass per window.
    ///
    /// The task only holds a weak reference and stops once the limiter is dropped.
    pub fn start_compaction_task(self: &Arc<Self>) -> JoinHandle<()> {
        let limiter = Arc::downgrade(self);
        let period = self.window;

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately
            interval.tick().await;

            loop {
                interval.tick().await;
                let Some(limiter) = limiter.upgrade() else {
                    break;
                };
                let removed = limiter.compact();
                if removed > 0 {
                    debug!(
                        removed,
                        remaining = limiter.tracked_keys(),
                        "Compacted rate limiter keys"
                    );
                }
            }
        })
    }

    /// Number of caller keys currently tracked
    pub fn tracked_keys(&self) -> usize {
        self.histories.lock().len()
    }
}
