//! Helper functions for middleware

use crate::auth::{AuthContext, AuthMethod};
use crate::utils::error::GatewayError;
use actix_web::dev::Payload;
use actix_web::http::header::{AUTHORIZATION, COOKIE, HeaderMap};
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures::future::{Ready, ready};

/// Extract authentication method from headers
///
/// Checked in order: `Authorization: Bearer`, `Authorization: ApiKey`,
/// `X-API-Key`, then the session cookie named `session_cookie`.
pub fn extract_auth_method(headers: &HeaderMap, session_cookie: &str) -> AuthMethod {
    // Check Authorization header
    if let Some(auth_str) = headers.get(AUTHORIZATION).and_then(|h| h.to_str().ok()) {
        // Scheme names are case-insensitive
        if let Some((scheme, credentials)) = auth_str.trim().split_once(' ') {
            let credentials = credentials.trim().to_string();
            if scheme.eq_ignore_ascii_case("bearer") {
                return AuthMethod::Jwt(credentials);
            } else if scheme.eq_ignore_ascii_case("apikey") {
                return AuthMethod::ApiKey(credentials);
            }
        }
    }

    // Check X-API-Key header
    if let Some(key) = headers.get("x-api-key").and_then(|h| h.to_str().ok()) {
        return AuthMethod::ApiKey(key.trim().to_string());
    }

    // Check session cookie
    for cookie_header in headers.get_all(COOKIE) {
        let Ok(cookie_str) = cookie_header.to_str() else {
            continue;
        };
        for cookie in cookie_str.split(';') {
            if let Some((name, value)) = cookie.trim().split_once('=') {
                if name == session_cookie && !value.is_empty() {
                    return AuthMethod::Session(value.to_string());
                }
            }
        }
    }

    AuthMethod::None
}

/// Handlers behind the gateway receive the caller as an extractor parameter
impl FromRequest for AuthContext {
    type Error = GatewayError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthContext>()
                .cloned()
                .ok_or_else(|| GatewayError::internal("Missing request context")),
        )
    }
}
