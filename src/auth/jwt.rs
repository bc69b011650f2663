//! Signed token validation
//!
//! Bearer tokens and session cookies share one HS256 token format.

use super::types::{AuthContext, AuthKind, AuthMethod};
use super::Authenticator;
use crate::config::AuthConfig;
use crate::utils::error::{GatewayError, Result};
use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::debug;

/// Token claims
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Issuer
    pub iss: String,
    /// Issued at timestamp
    pub iat: u64,
    /// Expiration timestamp
    pub exp: u64,
    /// Granted scopes
    #[serde(default)]
    pub scopes: Vec<String>,
}

/// Validates bearer and session tokens
#[derive(Clone)]
pub struct JwtAuthenticator {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    issuer: String,
}

impl std::fmt::Debug for JwtAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtAuthenticator")
            .field("algorithm", &self.algorithm)
            .field("issuer", &self.issuer)
            .field("encoding_key", &"[REDACTED]")
            .field("decoding_key", &"[REDACTED]")
            .finish()
    }
}

impl JwtAuthenticator {
    pub fn new(secret: &str, issuer: impl Into<String>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            algorithm: Algorithm::HS256,
            issuer: issuer.into(),
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(&config.jwt_secret, config.jwt_issuer.clone())
    }

    /// Mint a token for `user_id` valid for `ttl`
    pub fn issue_token(&self, user_id: &str, scopes: &[String], ttl: Duration) -> Result<String> {
        let now = unix_now()?;
        self.sign(&Claims {
            sub: user_id.to_string(),
            iss: self.issuer.clone(),
            iat: now,
            exp: now + ttl.as_secs(),
            scopes: scopes.to_vec(),
        })
    }

    /// Sign arbitrary claims
    pub fn sign(&self, claims: &Claims) -> Result<String> {
        Ok(encode(&Header::new(self.algorithm), claims, &self.encoding_key)?)
    }

    /// Verify signature, expiry and issuer
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(self.algorithm);
        validation.set_issuer(&[&self.issuer]);

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)?.claims;
        if claims.sub.is_empty() {
            return Err(GatewayError::unauthorized("Token has no subject"));
        }
        Ok(claims)
    }
}

#[async_trait]
impl Authenticator for JwtAuthenticator {
    async fn authenticate(&self, credentials: &AuthMethod) -> Result<AuthContext> {
        let (token, kind) = match credentials {
            AuthMethod::Jwt(token) => (token, AuthKind::Bearer),
            AuthMethod::Session(token) => (token, AuthKind::Session),
            _ => return Err(GatewayError::unauthorized("Expected a bearer or session token")),
        };

        let claims = self.verify(token)?;
        debug!(user_id = %claims.sub, ?kind, "Token validated");
        Ok(AuthContext::user(claims.sub, claims.scopes, kind))
    }
}

fn unix_now() -> Result<u64> {
    Ok(SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| GatewayError::internal(format!("System time error: {}", e)))?
        .as_secs())
}
