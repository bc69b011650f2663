//! Application state shared across HTTP handlers

use crate::auth::CompositeAuthenticator;
use crate::config::Config;
use crate::core::rate_limiter::RateLimiter;
use crate::core::response_cache::ResponseCache;
use crate::server::middleware::Gateway;
use crate::utils::error::Result;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// The limiter and cache are constructed once per process and shared by
/// every worker; the gateway holds the same instances.
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration (shared read-only)
    pub config: Arc<Config>,
    /// Sliding window rate limiter
    pub limiter: Arc<RateLimiter>,
    /// Response cache
    pub cache: Arc<ResponseCache>,
    /// Gateway components for wrapping routes
    pub gateway: Gateway,
}

impl AppState {
    /// Build the components described by `config`
    pub fn new(config: Config) -> Result<Self> {
        let limiter = Arc::new(RateLimiter::new(config.rate_limit().clone())?);
        let cache = Arc::new(ResponseCache::new(config.cache().clone()));
        let authenticator = Arc::new(CompositeAuthenticator::from_config(config.auth()));

        let gateway = Gateway::new(
            Arc::clone(&limiter),
            Arc::clone(&cache),
            authenticator,
            config.server().cors.clone(),
        )
        .with_session_cookie(&config.auth().session_cookie);

        Ok(Self {
            config: Arc::new(config),
            limiter,
            cache,
            gateway,
        })
    }

    /// Get gateway configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
