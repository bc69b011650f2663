//! API gateway middleware
//!
//! [`Gateway`] owns the shared components (rate limiter, response cache,
//! authenticator) and produces one [`ApiGateway`] transform per route:
//!
//! ```ignore
//! web::resource("/api/v1/bots")
//!     .wrap(gateway.route(RouteConfig::new("v1").rate_limit(60).cache_seconds(30)))
//!     .wrap(gateway.cors())
//!     .route(web::get().to(list_bots))
//! ```
//!
//! The transform keeps a handle on the request while the handler runs, so it
//! belongs on a resource rather than on a scope that registers its own app data.
//!
//! Browser-facing resources also wrap [`Gateway::cors`] after the gateway so
//! the CORS layer is outermost and answers preflight before authentication.

use super::helpers::extract_auth_method;
use super::outcome::{GatewayOutcome, Quota};
use crate::auth::Authenticator;
use crate::config::CorsConfig;
use crate::config::models::default_session_cookie;
use crate::core::rate_limiter::{RateLimitDecision, RateLimiter};
use crate::core::response_cache::{CacheKey, CacheScope, CachedResponse, ResponseCache};
use crate::utils::error::{ErrorResponse, GatewayError};
use actix_cors::Cors;
use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::Method;
use actix_web::http::header::{HeaderName, HeaderValue, RETRY_AFTER, SET_COOKIE};
use actix_web::{HttpMessage, HttpRequest, HttpResponse, ResponseError};
use futures::FutureExt;
use futures::future::{Ready, ready};
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

const X_API_VERSION: HeaderName = HeaderName::from_static("x-api-version");
const X_CACHE: HeaderName = HeaderName::from_static("x-cache");
const X_RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
const X_RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");

/// Per-route gateway parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteConfig {
    /// Requests per limiter window; `None` leaves the route unlimited
    pub rate_limit: Option<u32>,
    /// Response cache TTL in seconds; `0` disables caching
    pub cache_seconds: u64,
    /// Version tag for logs and the `X-API-Version` header
    pub version: String,
    /// Whether cached responses are partitioned by caller
    pub cache_scope: CacheScope,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self::new("v1")
    }
}

impl RouteConfig {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            rate_limit: None,
            cache_seconds: 0,
            version: version.into(),
            cache_scope: CacheScope::default(),
        }
    }

    pub fn rate_limit(mut self, requests_per_window: u32) -> Self {
        self.rate_limit = Some(requests_per_window);
        self
    }

    pub fn cache_seconds(mut self, seconds: u64) -> Self {
        self.cache_seconds = seconds;
        self
    }

    pub fn cache_scope(mut self, scope: CacheScope) -> Self {
        self.cache_scope = scope;
        self
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_seconds)
    }
}

/// Components shared by every gateway-wrapped route
#[derive(Clone)]
pub struct Gateway {
    limiter: Arc<RateLimiter>,
    cache: Arc<ResponseCache>,
    authenticator: Arc<dyn Authenticator>,
    cors: Arc<CorsConfig>,
    session_cookie: Arc<str>,
}

impl Gateway {
    pub fn new(
        limiter: Arc<RateLimiter>,
        cache: Arc<ResponseCache>,
        authenticator: Arc<dyn Authenticator>,
        cors: CorsConfig,
    ) -> Self {
        Self {
            limiter,
            cache,
            authenticator,
            cors: Arc::new(cors),
            session_cookie: Arc::from(default_session_cookie()),
        }
    }

    /// Name of the cookie carrying session tokens
    pub fn with_session_cookie(mut self, name: impl AsRef<str>) -> Self {
        self.session_cookie = Arc::from(name.as_ref());
        self
    }

    /// Build the middleware for one route
    pub fn route(&self, route: RouteConfig) -> ApiGateway {
        ApiGateway {
            gateway: self.clone(),
            route: Rc::new(route),
        }
    }

    pub fn limiter(&self) -> &Arc<RateLimiter> {
        &self.limiter
    }

    pub fn cache(&self) -> &Arc<ResponseCache> {
        &self.cache
    }

    /// CORS layer built from the configured policy
    pub fn cors(&self) -> Cors {
        let config = &self.cors;
        let mut cors = Cors::default();

        if config.allows_all_origins() {
            cors = cors.allow_any_origin();
        } else {
            for origin in &config.allowed_origins {
                cors = cors.allowed_origin(origin);
            }
        }

        let methods: Vec<Method> = config
            .allowed_methods
            .iter()
            .filter_map(|m| m.parse().ok())
            .collect();
        if !methods.is_empty() {
            cors = cors.allowed_methods(methods);
        }

        let headers: Vec<HeaderName> = config
            .allowed_headers
            .iter()
            .filter_map(|h| h.parse().ok())
            .collect();
        if !headers.is_empty() {
            cors = cors.allowed_headers(headers);
        }

        cors = cors
            .expose_headers([
                X_API_VERSION,
                X_CACHE,
                X_RATELIMIT_LIMIT,
                X_RATELIMIT_REMAINING,
                RETRY_AFTER,
            ])
            .max_age(config.max_age as usize);

        if config.allow_credentials {
            cors = cors.supports_credentials();
        }
        cors
    }

    /// Run authentication, rate limiting and cache lookup, in that order,
    /// stopping at the first stage that ends the request
    pub async fn evaluate(&self, route: &RouteConfig, req: &HttpRequest) -> GatewayOutcome {
        let version: Arc<str> = Arc::from(route.version.as_str());

        let credentials = extract_auth_method(req.headers(), &self.session_cookie);
        let auth = match self.authenticator.authenticate(&credentials).await {
            Ok(auth) => auth,
            Err(error) => return GatewayOutcome::Unauthenticated { version, error },
        };
        let caller = auth.caller_key();

        let quota = match route.rate_limit {
            Some(limit) => {
                let decision = self.limiter.check(&caller, limit);
                match decision {
                    RateLimitDecision::Allowed { remaining, .. } => Some(Quota { limit, remaining }),
                    RateLimitDecision::Rejected { .. } => {
                        return GatewayOutcome::RateLimited {
                            version,
                            caller,
                            limit,
                            retry_after_secs: decision.retry_after_secs().unwrap_or(1),
                        };
                    }
                }
            }
            None => None,
        };

        let cache_key = self.cache_key(route, req, &caller);
        if let Some(response) = cache_key.as_ref().and_then(|key| self.cache.get(key)) {
            debug!(version = %version, path = %req.path(), caller = %caller, "Serving cached response");
            return GatewayOutcome::CachedHit {
                version,
                response,
                quota,
            };
        }

        GatewayOutcome::Allowed {
            version,
            auth,
            quota,
            cache_key,
        }
    }

    /// Only read-only requests on routes with a positive TTL are cache-eligible
    fn cache_key(&self, route: &RouteConfig, req: &HttpRequest, caller: &str) -> Option<CacheKey> {
        if route.cache_seconds == 0 || !self.cache.is_enabled() || req.method() != Method::GET {
            return None;
        }
        Some(CacheKey::for_scope(
            req.method().as_str(),
            req.path(),
            req.query_string(),
            caller,
            route.cache_scope,
        ))
    }
}

/// Gateway middleware for one route
pub struct ApiGateway {
    gateway: Gateway,
    route: Rc<RouteConfig>,
}

impl<S, B> Transform<S, ServiceRequest> for ApiGateway
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = ApiGatewayService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ApiGatewayService {
            service: Rc::new(service),
            gateway: self.gateway.clone(),
            route: Rc::clone(&self.route),
        }))
    }
}

/// Service implementation for the gateway middleware
pub struct ApiGatewayService<S> {
    service: Rc<S>,
    gateway: Gateway,
    route: Rc<RouteConfig>,
}

impl<S, B> Service<ServiceRequest> for ApiGatewayService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let gateway = self.gateway.clone();
        let route = Rc::clone(&self.route);

        Box::pin(async move {
            // Preflight normally ends in the CORS layer; one that gets here
            // still never reaches authentication.
            if req.method() == Method::OPTIONS {
                debug!(version = %route.version, path = %req.path(), "Answering preflight");
                let mut res = req.into_response(HttpResponse::NoContent().finish());
                set_version_header(&mut res, &route.version);
                return Ok(res);
            }

            let outcome = gateway.evaluate(&route, req.request()).await;
            let version = Arc::clone(outcome.version());
            let mut res = match outcome {
                GatewayOutcome::Allowed {
                    auth,
                    quota,
                    cache_key,
                    ..
                } => {
                    req.extensions_mut().insert(auth);
                    let res = invoke(service.as_ref(), req, &route).await;
                    let mut res = match cache_key {
                        Some(key) => {
                            let mut res =
                                populate_cache(&gateway.cache, key, route.cache_ttl(), res).await;
                            res.headers_mut()
                                .insert(X_CACHE, HeaderValue::from_static("MISS"));
                            res
                        }
                        None => res,
                    };
                    set_quota_headers(&mut res, quota);
                    res
                }
                GatewayOutcome::CachedHit { response, quota, .. } => {
                    let mut res = req.into_response(response.to_http_response());
                    res.headers_mut()
                        .insert(X_CACHE, HeaderValue::from_static("HIT"));
                    set_quota_headers(&mut res, quota);
                    res
                }
                GatewayOutcome::Unauthenticated { error, .. } => {
                    warn!(
                        version = %version,
                        path = %req.path(),
                        error = %error,
                        "Authentication failed"
                    );
                    req.error_response(error)
                }
                GatewayOutcome::RateLimited {
                    caller,
                    limit,
                    retry_after_secs,
                    ..
                } => {
                    warn!(
                        version = %version,
                        path = %req.path(),
                        caller = %caller,
                        limit,
                        retry_after_secs,
                        "Rate limit exceeded"
                    );
                    req.error_response(GatewayError::rate_limited(limit, retry_after_secs))
                }
            };

            set_version_header(&mut res, &version);
            Ok(res)
        })
    }
}

/// Call the wrapped handler, turning panics and errors into the stable error shape
async fn invoke<S, B>(service: &S, req: ServiceRequest, route: &RouteConfig) -> ServiceResponse<BoxBody>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody + 'static,
{
    let http_req = req.request().clone();
    let path = req.path().to_owned();

    match AssertUnwindSafe(async { service.call(req).await })
        .catch_unwind()
        .await
    {
        Ok(Ok(res)) => translate_error_response(res.map_into_boxed_body(), route),
        Ok(Err(err)) => {
            let status = err.as_response_error().status_code();
            if status.is_server_error() {
                error!(version = %route.version, path = %path, error = %err, "Handler failed");
            }
            let res = match err.as_error::<GatewayError>() {
                Some(gateway_err) => gateway_err.error_response(),
                None => ErrorResponse::from_foreign(status, &err.to_string()),
            };
            ServiceResponse::new(http_req, res)
        }
        Err(panic) => {
            error!(
                version = %route.version,
                path = %path,
                panic = %panic_message(panic.as_ref()),
                "Handler panicked"
            );
            ServiceResponse::new(
                http_req,
                GatewayError::internal("Handler panicked").error_response(),
            )
        }
    }
}

/// Gateway errors raised by the handler are already rendered in the stable
/// shape; anything else actix produced is re-rendered, masking server errors
fn translate_error_response(res: ServiceResponse<BoxBody>, route: &RouteConfig) -> ServiceResponse<BoxBody> {
    let foreign = match res.response().error() {
        None => return res,
        Some(err) => match err.as_error::<GatewayError>() {
            Some(gateway_err) => {
                if gateway_err.is_client_error() {
                    debug!(version = %route.version, path = %res.request().path(), error = %gateway_err, "Handler rejected request");
                } else {
                    error!(version = %route.version, path = %res.request().path(), error = %gateway_err, "Handler failed");
                }
                None
            }
            None => Some(err.to_string()),
        },
    };
    let Some(message) = foreign else {
        return res;
    };

    let status = res.status();
    if status.is_server_error() {
        error!(version = %route.version, path = %res.request().path(), error = %message, "Handler failed");
    }
    let (req, _) = res.into_parts();
    ServiceResponse::new(req, ErrorResponse::from_foreign(status, &message))
}

/// Store a successful response once its body is fully buffered. A request
/// dropped before this point leaves the cache untouched.
async fn populate_cache(
    cache: &ResponseCache,
    key: CacheKey,
    ttl: Duration,
    res: ServiceResponse<BoxBody>,
) -> ServiceResponse<BoxBody> {
    if !res.status().is_success() {
        return res;
    }

    let (req, res) = res.into_parts();
    let (res, body) = res.into_parts();
    let body = match actix_web::body::to_bytes(body).await {
        Ok(body) => body,
        Err(e) => {
            error!(error = %e, "Failed to buffer response body for caching");
            return ServiceResponse::new(
                req,
                GatewayError::internal("Failed to read response body").error_response(),
            );
        }
    };

    let headers = res
        .headers()
        .iter()
        .filter(|(name, _)| **name != SET_COOKIE)
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect();
    cache.insert(key, CachedResponse::new(res.status(), headers, body.clone()), ttl);

    ServiceResponse::new(req, res.set_body(body).map_into_boxed_body())
}

fn set_quota_headers(res: &mut ServiceResponse<BoxBody>, quota: Option<Quota>) {
    if let Some(Quota { limit, remaining }) = quota {
        let headers = res.headers_mut();
        headers.insert(X_RATELIMIT_LIMIT, HeaderValue::from(limit));
        headers.insert(X_RATELIMIT_REMAINING, HeaderValue::from(remaining));
    }
}

fn set_version_header(res: &mut ServiceResponse<BoxBody>, version: &str) {
    if let Ok(version) = HeaderValue::from_str(version) {
        res.headers_mut().insert(X_API_VERSION, version);
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        msg
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg
    } else {
        "non-string panic payload"
    }
}
