//! Authentication collaborators
//!
//! The gateway only knows the [`Authenticator`] contract: given the
//! credentials found on a request, resolve the caller or fail. Concrete
//! collaborators validate signed bearer/session tokens and static API keys.

pub mod api_key;
pub mod jwt;
mod types;


pub use api_key::ApiKeyAuthenticator;
pub use jwt::{Claims, JwtAuthenticator};
pub use types::{AuthContext, AuthKind, AuthMethod};

use crate::config::AuthConfig;
use crate::utils::error::{GatewayError, Result};
use async_trait::async_trait;
use tracing::debug;

/// Resolves request credentials into a caller identity
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Validate `credentials`, yielding the caller's identity and claims.
    /// Missing or invalid credentials must produce `GatewayError::Unauthorized`
    /// (or another 401-class error such as `GatewayError::Jwt`).
    async fn authenticate(&self, credentials: &AuthMethod) -> Result<AuthContext>;
}

/// Dispatches credentials to the collaborator for their kind
#[derive(Debug)]
pub struct CompositeAuthenticator {
    jwt: Option<JwtAuthenticator>,
    api_keys: Option<ApiKeyAuthenticator>,
}

impl CompositeAuthenticator {
    pub fn new(jwt: Option<JwtAuthenticator>, api_keys: Option<ApiKeyAuthenticator>) -> Self {
        Self { jwt, api_keys }
    }

    /// Token validation is always on; API keys only when some are provisioned
    pub fn from_config(config: &AuthConfig) -> Self {
        let api_keys = (!config.api_keys.is_empty())
            .then(|| ApiKeyAuthenticator::new(config.api_keys.iter().cloned()));
        debug!(
            api_keys = config.api_keys.len(),
            "Initialized authentication collaborators"
        );
        Self::new(Some(JwtAuthenticator::from_config(config)), api_keys)
    }
}

#[async_trait]
impl Authenticator for CompositeAuthenticator {
    async fn authenticate(&self, credentials: &AuthMethod) -> Result<AuthContext> {
        match credentials {
            AuthMethod::Jwt(_) | AuthMethod::Session(_) => match &self.jwt {
                Some(jwt) => jwt.authenticate(credentials).await,
                None => Err(GatewayError::unauthorized(
                    "Token authentication is not enabled",
                )),
            },
            AuthMethod::ApiKey(_) => match &self.api_keys {
                Some(api_keys) => api_keys.authenticate(credentials).await,
                None => Err(GatewayError::unauthorized("Invalid API key")),
            },
            AuthMethod::None => Err(GatewayError::unauthorized("Missing credentials")),
        }
    }
}
