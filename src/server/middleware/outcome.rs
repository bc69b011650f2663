//! Per-request gateway decision record

use crate::auth::AuthContext;
use crate::core::response_cache::{CacheKey, CachedResponse};
use crate::utils::error::GatewayError;
use std::sync::Arc;

/// Budget left for the caller after an admitted request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quota {
    pub limit: u32,
    pub remaining: u32,
}

/// What the gateway decided before the handler could run. Every variant
/// carries the route's version tag for logs and the `X-API-Version` header.
#[derive(Debug)]
pub enum GatewayOutcome {
    /// Invoke the handler
    Allowed {
        version: Arc<str>,
        auth: AuthContext,
        /// Present when the route is rate limited
        quota: Option<Quota>,
        /// Present when the response should be cached on success
        cache_key: Option<CacheKey>,
    },
    /// The caller's budget for the window is exhausted
    RateLimited {
        version: Arc<str>,
        caller: String,
        limit: u32,
        retry_after_secs: u64,
    },
    /// Credentials were missing or invalid
    Unauthenticated {
        version: Arc<str>,
        error: GatewayError,
    },
    /// A live cached response answers the request
    CachedHit {
        version: Arc<str>,
        response: Arc<CachedResponse>,
        quota: Option<Quota>,
    },
}

impl GatewayOutcome {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GatewayOutcome::Allowed { .. })
    }

    pub fn version(&self) -> &Arc<str> {
        match self {
            GatewayOutcome::Allowed { version, .. }
            | GatewayOutcome::RateLimited { version, .. }
            | GatewayOutcome::Unauthenticated { version, .. }
            | GatewayOutcome::CachedHit { version, .. } => version,
        }
    }
}
