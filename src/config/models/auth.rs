//! Authentication configuration

use super::*;
use rand::distributions::Alphanumeric;
use rand::{Rng, thread_rng};
use serde::{Deserialize, Serialize};

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthConfig {
    /// HMAC secret for bearer and session tokens
    #[serde(default = "generate_secure_jwt_secret")]
    pub jwt_secret: String,
    /// Expected `iss` claim
    #[serde(default = "default_jwt_issuer")]
    pub jwt_issuer: String,
    /// Name of the cookie carrying the session token
    #[serde(default = "default_session_cookie")]
    pub session_cookie: String,
    /// Statically provisioned API keys
    #[serde(default)]
    pub api_keys: Vec<ApiKeyConfig>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: generate_secure_jwt_secret(),
            jwt_issuer: default_jwt_issuer(),
            session_cookie: default_session_cookie(),
            api_keys: vec![],
        }
    }
}

/// A provisioned API key. Only the SHA-256 digest of the key is configured.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiKeyConfig {
    /// Stable identifier, used as the caller key
    pub id: String,
    /// Lowercase hex SHA-256 of the raw key
    pub key_hash: String,
    /// Owning user
    pub user_id: String,
    /// Granted scopes
    #[serde(default)]
    pub scopes: Vec<String>,
}

fn generate_secure_jwt_secret() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}
