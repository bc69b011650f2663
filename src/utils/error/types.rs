//! Error types for the gateway

use thiserror::Error;

/// Result type alias for the gateway
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Main error type for the gateway
///
/// The gateway itself only originates `Unauthorized` and `RateLimited`; the
/// remaining client-facing variants are raised by wrapped route handlers and
/// passed through unchanged.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed input
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Missing or invalid credentials
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated but not permitted
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Conflict errors
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Caller exhausted its request budget for the current window
    #[error("Rate limit exceeded: {limit} requests per window, retry in {retry_after_secs}s")]
    RateLimited { limit: u32, retry_after_secs: u64 },

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),

    /// JWT errors
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<::config::ConfigError> for GatewayError {
    fn from(err: ::config::ConfigError) -> Self {
        GatewayError::Config(err.to_string())
    }
}
