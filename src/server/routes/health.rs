//! Health check endpoint
//!
//! Public and not gateway-wrapped, so load balancers can probe it without credentials.

use crate::BuildInfo;
use crate::core::response_cache::CacheStats;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use actix_web::{HttpResponse, web};
use serde::Serialize;
use std::borrow::Cow;
use tracing::debug;

/// Basic health check endpoint
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    debug!("Health check requested");

    let status = HealthStatus {
        status: Cow::Borrowed("healthy"),
        timestamp: chrono::Utc::now(),
        build: crate::build_info(),
        rate_limiter: RateLimiterStatus {
            tracked_keys: state.limiter.tracked_keys(),
            max_tracked_keys: state.limiter.config().max_tracked_keys,
            window_ms: state.limiter.config().window_ms,
        },
        cache: state.cache.stats(),
    };

    HttpResponse::Ok().json(ApiResponse::success(status))
}

/// Health status
#[derive(Debug, Clone, Serialize)]
struct HealthStatus {
    status: Cow<'static, str>,
    timestamp: chrono::DateTime<chrono::Utc>,
    #[serde(flatten)]
    build: BuildInfo,
    rate_limiter: RateLimiterStatus,
    cache: CacheStats,
}

/// Rate limiter occupancy
#[derive(Debug, Clone, Serialize)]
struct RateLimiterStatus {
    tracked_keys: usize,
    max_tracked_keys: usize,
    window_ms: u64,
}
