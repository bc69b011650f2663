//! Logging setup
//!
//! Installs a `tracing-subscriber` fmt subscriber filtered by the configured
//! level, which `RUST_LOG` overrides when present.

use crate::config::LoggingConfig;
use crate::utils::error::{GatewayError, Result};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Initialize the global subscriber
///
/// Calling this again once a subscriber is installed is a no-op.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| {
            GatewayError::config(format!("Invalid log filter '{}': {}", config.level, e))
        })?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false);

    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if let Err(e) = installed {
        debug!("Logging already initialized: {}", e);
    }
    Ok(())
}
