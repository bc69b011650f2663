//! Configuration management for the gateway
//!
//! Configuration is layered: a YAML file first, then environment variables
//! prefixed with `CHATBOT_GATEWAY` (nested keys separated by `__`, e.g.
//! `CHATBOT_GATEWAY_RATE_LIMIT__WINDOW_MS=30000`).

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{GatewayError, Result};
use ::config::{Environment, File, FileFormat};
use std::path::Path;
use tracing::{debug, info};

const ENV_PREFIX: &str = "CHATBOT_GATEWAY";

/// Main configuration struct for the gateway
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Gateway configuration
    pub gateway: GatewayConfig,
}

impl Config {
    /// Load configuration from a YAML file, applying environment overrides
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        // A missing .env is the common case outside development
        let _ = dotenvy::dotenv();

        let gateway: GatewayConfig = ::config::Config::builder()
            .add_source(File::from(path).format(FileFormat::Yaml).required(true))
            .add_source(env_source())
            .build()?
            .try_deserialize()?;

        let config = Self { gateway };
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse configuration from YAML text, without environment overrides
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let gateway: GatewayConfig = ::config::Config::builder()
            .add_source(File::from_str(content, FileFormat::Yaml))
            .build()?
            .try_deserialize()?;

        let config = Self { gateway };
        config.validate()?;
        Ok(config)
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.gateway.server
    }

    /// Get rate limiter configuration
    pub fn rate_limit(&self) -> &RateLimitConfig {
        &self.gateway.rate_limit
    }

    /// Get response cache configuration
    pub fn cache(&self) -> &CacheConfig {
        &self.gateway.cache
    }

    /// Get auth configuration
    pub fn auth(&self) -> &AuthConfig {
        &self.gateway.auth
    }

    /// Get logging configuration
    pub fn logging(&self) -> &LoggingConfig {
        &self.gateway.logging
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.gateway
            .validate()
            .map_err(|e| GatewayError::Config(format!("Invalid configuration: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }
}

fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
