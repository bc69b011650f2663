//! Rate limiter types and data structures

use std::collections::VecDeque;
use std::time::Duration;
use tokio::time::Instant;

/// Outcome of a single `RateLimiter::check`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    /// The request was admitted and recorded
    Allowed {
        /// Requests still available in the current window
        remaining: u32,
        /// Time until the oldest recorded request leaves the window
        reset_after: Duration,
    },
    /// The caller's budget for the window is exhausted; nothing was recorded
    Rejected {
        /// The limit that was applied
        limit: u32,
        /// Time until a slot frees up
        retry_after: Duration,
    },
}

impl RateLimitDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitDecision::Allowed { .. })
    }

    /// Whole seconds until the caller may retry, never less than one
    pub fn retry_after_secs(&self) -> Option<u64> {
        match self {
            RateLimitDecision::Allowed { .. } => None,
            RateLimitDecision::Rejected { retry_after, .. } => Some(ceil_secs(*retry_after)),
        }
    }
}

pub(super) fn ceil_secs(duration: Duration) -> u64 {
    let secs = duration.as_secs() + u64::from(duration.subsec_nanos() > 0);
    secs.max(1)
}

/// Admitted-request timestamps for one caller, oldest first
#[derive(Debug, Default)]
pub(super) struct KeyHistory {
    timestamps: VecDeque<Instant>,
}

impl KeyHistory {
    /// Drop timestamps that are no longer inside the window ending at `now`
    pub(super) fn prune(&mut self, now: Instant, window: Duration) {
        while let Some(&oldest) = self.timestamps.front() {
            if now.saturating_duration_since(oldest) >= window {
                self.timestamps.pop_front();
            } else {
                break;
            }
        }
    }

    pub(super) fn record(&mut self, now: Instant) {
        self.timestamps.push_back(now);
    }

    pub(super) fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub(super) fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// `window` minus the age of the oldest timestamp
    pub(super) fn reset_after(&self, now: Instant, window: Duration) -> Duration {
        match self.timestamps.front() {
            Some(&oldest) => window.saturating_sub(now.saturating_duration_since(oldest)),
            None => window,
        }
    }
}
