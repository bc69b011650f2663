//! Caller account endpoints
//!
//! Thin handlers behind the gateway; they only see the resolved [`AuthContext`].

use crate::auth::AuthContext;
use crate::server::middleware::{Gateway, RouteConfig};
use crate::server::routes::ApiResponse;
use actix_web::{HttpResponse, web};
use serde::Serialize;

const ACCOUNT_RATE_LIMIT: u32 = 120;
const SCOPES_CACHE_SECONDS: u64 = 30;

/// Configure account routes behind the gateway, with the CORS layer outermost
pub fn configure_routes(cfg: &mut web::ServiceConfig, gateway: &Gateway) {
    cfg.service(
        web::resource("/api/v1/me")
            .wrap(gateway.route(RouteConfig::new("v1").rate_limit(ACCOUNT_RATE_LIMIT)))
            .wrap(gateway.cors())
            .route(web::get().to(me)),
    )
    .service(
        web::resource("/api/v1/session/scopes")
            .wrap(
                gateway.route(
                    RouteConfig::new("v1")
                        .rate_limit(ACCOUNT_RATE_LIMIT)
                        .cache_seconds(SCOPES_CACHE_SECONDS),
                ),
            )
            .wrap(gateway.cors())
            .route(web::get().to(session_scopes)),
    );
}

/// Echo the authenticated caller
async fn me(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(auth))
}

#[derive(Debug, Serialize)]
struct SessionScopes {
    user_id: String,
    scopes: Vec<String>,
    generated_at: chrono::DateTime<chrono::Utc>,
}

/// Scopes granted to the caller's credentials
async fn session_scopes(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(SessionScopes {
        user_id: auth.user_id,
        scopes: auth.scopes,
        generated_at: chrono::Utc::now(),
    }))
}
