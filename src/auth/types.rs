//! Authentication types

use serde::{Deserialize, Serialize};

/// Credentials found on an inbound request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthMethod {
    /// Bearer token authentication
    Jwt(String),
    /// API key authentication
    ApiKey(String),
    /// Session cookie authentication
    Session(String),
    /// No credentials
    None,
}

/// How a caller proved its identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthKind {
    Bearer,
    Session,
    ApiKey,
}

/// Resolved caller identity, handed to exactly one request's handler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user
    pub user_id: String,
    /// Granted scopes
    pub scopes: Vec<String>,
    /// Credential kind
    pub kind: AuthKind,
    /// API key identifier, when the caller used one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_id: Option<String>,
}

impl AuthContext {
    pub fn user(user_id: impl Into<String>, scopes: Vec<String>, kind: AuthKind) -> Self {
        Self {
            user_id: user_id.into(),
            scopes,
            kind,
            key_id: None,
        }
    }

    pub fn api_key(key_id: impl Into<String>, user_id: impl Into<String>, scopes: Vec<String>) -> Self {
        Self {
            user_id: user_id.into(),
            scopes,
            kind: AuthKind::ApiKey,
            key_id: Some(key_id.into()),
        }
    }

    /// Identity used to partition rate-limit and cache state. API keys are
    /// budgeted per key, everything else per user.
    pub fn caller_key(&self) -> String {
        match &self.key_id {
            Some(key_id) => format!("key:{}", key_id),
            None => format!("user:{}", self.user_id),
        }
    }

    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes.iter().any(|s| s == scope)
    }
}
