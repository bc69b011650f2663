//! Response cache configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Response cache configuration
///
/// Per-route TTLs live on the route; this only bounds the shared store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CacheConfig {
    /// Master switch; when off, every route behaves as `cache_seconds = 0`
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Soft upper bound on stored responses
    #[serde(default = "default_cache_max_entries")]
    pub max_entries: usize,
    /// Period of the background expiry sweep
    #[serde(default = "default_cache_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_entries: default_cache_max_entries(),
            sweep_interval_secs: default_cache_sweep_interval_secs(),
        }
    }
}

impl CacheConfig {
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}
