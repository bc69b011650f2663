//! Configuration data models
//!
//! This module defines all configuration structures used throughout the gateway.

pub mod auth;
pub mod cache;
pub mod gateway;
pub mod logging;
pub mod rate_limit;
pub mod server;

// Re-export all configuration types
pub use auth::*;
pub use cache::*;
pub use gateway::*;
pub use logging::*;
pub use rate_limit::*;
pub use server::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8000
}

/// Default sliding window length (one minute)
pub fn default_window_ms() -> u64 {
    60_000
}

/// Default bound on distinct rate-limited callers
pub fn default_max_tracked_keys() -> usize {
    10_000
}

pub fn default_cache_max_entries() -> usize {
    10_000
}

pub fn default_cache_sweep_interval_secs() -> u64 {
    60
}

pub fn default_cors_methods() -> Vec<String> {
    ["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"]
        .iter()
        .map(|m| m.to_string())
        .collect()
}

pub fn default_cors_headers() -> Vec<String> {
    ["authorization", "content-type", "x-api-key"]
        .iter()
        .map(|h| h.to_string())
        .collect()
}

pub fn default_cors_max_age() -> u32 {
    86_400
}

pub fn default_jwt_issuer() -> String {
    "chatbot-gateway".to_string()
}

pub fn default_session_cookie() -> String {
    "session".to_string()
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_true() -> bool {
    true
}
