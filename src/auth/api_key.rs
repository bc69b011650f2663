//! Static API key validation

use super::types::{AuthContext, AuthMethod};
use super::Authenticator;
use crate::config::ApiKeyConfig;
use crate::utils::error::{GatewayError, Result};
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// Validates API keys against provisioned SHA-256 digests
#[derive(Debug, Default)]
pub struct ApiKeyAuthenticator {
    /// Provisioned keys by digest
    keys: HashMap<String, ApiKeyConfig>,
}

impl ApiKeyAuthenticator {
    pub fn new(keys: impl IntoIterator<Item = ApiKeyConfig>) -> Self {
        Self {
            keys: keys
                .into_iter()
                .map(|key| (key.key_hash.to_ascii_lowercase(), key))
                .collect(),
        }
    }

    /// Lowercase hex SHA-256 of a raw key, the form keys are provisioned in
    pub fn hash_key(raw_key: &str) -> String {
        hex::encode(Sha256::digest(raw_key.as_bytes()))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[async_trait]
impl Authenticator for ApiKeyAuthenticator {
    async fn authenticate(&self, credentials: &AuthMethod) -> Result<AuthContext> {
        let AuthMethod::ApiKey(raw_key) = credentials else {
            return Err(GatewayError::unauthorized("Expected an API key"));
        };

        self.keys
            .get(&Self::hash_key(raw_key))
            .map(|key| AuthContext::api_key(&key.id, &key.user_id, key.scopes.clone()))
            .ok_or_else(|| GatewayError::unauthorized("Invalid API key"))
    }
}
