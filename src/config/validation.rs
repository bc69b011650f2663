//! Configuration validation
//!
//! Every configuration section implements [`Validate`]; `GatewayConfig`
//! aggregates them and prefixes each failure with its section name.

use super::models::*;
use std::collections::HashSet;
use tracing::warn;

/// Validation trait for configuration structures
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

impl Validate for GatewayConfig {
    fn validate(&self) -> Result<(), String> {
        self.server
            .validate()
            .map_err(|e| format!("server: {}", e))?;
        self.rate_limit
            .validate()
            .map_err(|e| format!("rate_limit: {}", e))?;
        self.cache.validate().map_err(|e| format!("cache: {}", e))?;
        self.auth.validate().map_err(|e| format!("auth: {}", e))?;
        self.logging
            .validate()
            .map_err(|e| format!("logging: {}", e))?;
        Ok(())
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("Port cannot be 0".to_string());
        }
        if self.workers == Some(0) {
            return Err("workers must be greater than 0 when set".to_string());
        }
        self.cors.validate()
    }
}

impl Validate for CorsConfig {
    fn validate(&self) -> Result<(), String> {
        if self.allows_all_origins() && self.allow_credentials {
            return Err(
                "CORS cannot allow all origins (*) when credentials are enabled".to_string(),
            );
        }
        if self.allows_all_origins() {
            warn!("CORS allows all origins. This may be insecure for production.");
        }
        Ok(())
    }
}

impl Validate for RateLimitConfig {
    fn validate(&self) -> Result<(), String> {
        if self.window_ms == 0 {
            return Err("window_ms must be greater than 0".to_string());
        }
        if self.max_tracked_keys == 0 {
            return Err("max_tracked_keys must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Validate for CacheConfig {
    fn validate(&self) -> Result<(), String> {
        if self.enabled && self.max_entries == 0 {
            return Err("max_entries must be greater than 0 when caching is enabled".to_string());
        }
        if self.sweep_interval_secs == 0 {
            return Err("sweep_interval_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Validate for AuthConfig {
    fn validate(&self) -> Result<(), String> {
        if self.jwt_secret.len() < 32 {
            return Err("jwt_secret must be at least 32 characters long".to_string());
        }
        if self.session_cookie.trim().is_empty() {
            return Err("session_cookie cannot be empty".to_string());
        }

        let mut ids = HashSet::new();
        for key in &self.api_keys {
            if !ids.insert(key.id.as_str()) {
                return Err(format!("duplicate api key id: {}", key.id));
            }
            if key.user_id.is_empty() {
                return Err(format!("api key {} has no user_id", key.id));
            }
            let is_sha256_hex =
                key.key_hash.len() == 64 && key.key_hash.chars().all(|c| c.is_ascii_hexdigit());
            if !is_sha256_hex {
                return Err(format!(
                    "api key {} key_hash must be a hex SHA-256 digest",
                    key.id
                ));
            }
        }
        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        tracing_subscriber::EnvFilter::try_new(&self.level)
            .map(|_| ())
            .map_err(|e| format!("invalid level '{}': {}", self.level, e))
    }
}
