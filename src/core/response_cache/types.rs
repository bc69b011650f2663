//! Response cache type definitions

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use actix_web::http::header::{HeaderName, HeaderValue};
use bytes::Bytes;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Whether cached responses are partitioned by caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CacheScope {
    /// One entry per caller key; tenants never see each other's payloads
    #[default]
    PerCaller,
    /// One entry shared by every authenticated caller
    Shared,
}

/// Cache key derived from request identity
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    method: Arc<str>,
    path: Arc<str>,
    query: Arc<str>,
    caller: Option<Arc<str>>,
}

impl CacheKey {
    pub fn new(method: &str, path: &str, query: &str, caller: Option<&str>) -> Self {
        Self {
            method: Arc::from(method),
            path: Arc::from(path),
            query: Arc::from(query),
            caller: caller.map(Arc::from),
        }
    }

    /// Build a key honouring the route's cache scope
    pub fn for_scope(method: &str, path: &str, query: &str, caller: &str, scope: CacheScope) -> Self {
        let caller = match scope {
            CacheScope::PerCaller => Some(caller),
            CacheScope::Shared => None,
        };
        Self::new(method, path, query, caller)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)?;
        if !self.query.is_empty() {
            write!(f, "?{}", self.query)?;
        }
        if let Some(caller) = &self.caller {
            write!(f, " [{}]", caller)?;
        }
        Ok(())
    }
}

/// A fully buffered handler response
#[derive(Debug, Clone)]
pub struct CachedResponse {
    pub status: StatusCode,
    pub headers: Vec<(HeaderName, HeaderValue)>,
    pub body: Bytes,
}

impl CachedResponse {
    pub fn new(status: StatusCode, headers: Vec<(HeaderName, HeaderValue)>, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Rebuild an HTTP response carrying the stored status, headers and body
    pub fn to_http_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status);
        for (name, value) in &self.headers {
            builder.append_header((name.clone(), value.clone()));
        }
        builder.body(self.body.clone())
    }

    pub(super) fn size_bytes(&self) -> usize {
        self.body.len()
            + self
                .headers
                .iter()
                .map(|(n, v)| n.as_str().len() + v.len())
                .sum::<usize>()
    }
}

/// Cache entry with expiry
#[derive(Debug, Clone)]
pub(super) struct CacheEntry {
    pub(super) response: Arc<CachedResponse>,
    pub(super) expires_at: Instant,
}

impl CacheEntry {
    pub(super) fn new(response: CachedResponse, ttl: Duration, now: Instant) -> Self {
        Self {
            response: Arc::new(response),
            expires_at: now + ttl,
        }
    }

    /// Expired once `now` is past the expiry instant
    pub(super) fn is_expired(&self, now: Instant) -> bool {
        now > self.expires_at
    }
}

/// Point-in-time cache statistics
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub size_bytes: usize,
}
