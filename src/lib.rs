//! # chatbot-gateway
//!
//! In-process API gateway middleware for a multi-tenant chatbot dashboard.
//!
//! ## Features
//!
//! - **Authentication**: Bearer tokens, session cookies and static API keys
//! - **Rate Limiting**: Per-caller sliding window with a bounded key set
//! - **Response Caching**: Short-lived TTL cache for read-only routes
//! - **Uniform Errors**: One stable JSON error shape for every failure
//!
//! ## Wrapping a route
//!
//! ```rust,no_run
//! use actix_web::{App, HttpResponse, HttpServer, web};
//! use chatbot_gateway::{AppState, AuthContext, Config, RouteConfig};
//!
//! async fn list_bots(auth: AuthContext) -> HttpResponse {
//!     HttpResponse::Ok().json(serde_json::json!({ "owner": auth.user_id, "bots": [] }))
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/gateway.yaml")?;
//!     let state = AppState::new(config)?;
//!     let gateway = state.gateway.clone();
//!
//!     HttpServer::new(move || {
//!         App::new().service(
//!             web::resource("/api/v1/bots")
//!                 .wrap(gateway.route(RouteConfig::new("v1").rate_limit(60).cache_seconds(30)))
//!                 .wrap(gateway.cors())
//!                 .route(web::get().to(list_bots)),
//!         )
//!     })
//!     .bind("127.0.0.1:8000")?
//!     .run()
//!     .await?;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod auth;
pub mod config;
pub mod core;
pub mod server;
pub mod utils;

// Re-export main types
pub use auth::{AuthContext, AuthKind, AuthMethod, Authenticator, CompositeAuthenticator};
pub use config::Config;
pub use core::rate_limiter::{RateLimitDecision, RateLimiter};
pub use core::response_cache::{CacheKey, CacheScope, ResponseCache};
pub use server::middleware::{ApiGateway, Gateway, GatewayOutcome, RouteConfig};
pub use server::{AppState, HttpServer};
pub use utils::error::{GatewayError, Result};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Gateway build information
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Build timestamp (unix seconds)
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
}

/// Build metadata captured by the build script
pub fn build_info() -> BuildInfo {
    BuildInfo {
        version: VERSION,
        build_time: env!("BUILD_TIME"),
        git_hash: env!("GIT_HASH"),
    }
}
