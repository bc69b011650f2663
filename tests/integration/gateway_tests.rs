//! Gateway integration tests
//!
//! Drive the real application (routes, gateway, collaborators) in-process.

#[cfg(test)]
mod tests {
    use crate::common::fixtures::{self, RAW_API_KEY, SESSION_COOKIE};
    use actix_web::http::StatusCode;
    use actix_web::{test, web};
    use chatbot_gateway::auth::{Claims, JwtAuthenticator};
    use chatbot_gateway::server::{AppState, HttpServer};
    use chatbot_gateway::utils::error::ErrorResponse;
    use serde_json::Value;

    fn state() -> web::Data<AppState> {
        web::Data::new(AppState::new(fixtures::config()).unwrap())
    }

    fn header<B>(res: &actix_web::dev::ServiceResponse<B>, name: &str) -> Option<String> {
        res.headers()
            .get(name)
            .map(|v| v.to_str().unwrap().to_string())
    }

    /// Health check is public and reports component occupancy
    #[actix_web::test]
    async fn test_health_is_public() {
        let app = test::init_service(HttpServer::create_app(state())).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(header(&res, "server").as_deref(), Some("chatbot-gateway"));

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["data"]["status"], "healthy");
        assert_eq!(body["data"]["rate_limiter"]["tracked_keys"], 0);
    }

    /// Missing credentials yield 401 in the stable error shape
    #[actix_web::test]
    async fn test_me_requires_credentials() {
        let state = state();
        let app = test::init_service(HttpServer::create_app(state.clone())).await;

        let req = test::TestRequest::get().uri("/api/v1/me").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(header(&res, "x-api-version").as_deref(), Some("v1"));

        let body: ErrorResponse = test::read_body_json(res).await;
        assert_eq!(body.error.code, "UNAUTHORIZED");
        assert_eq!(body.error.message, "Missing credentials");
        assert_eq!(state.limiter.tracked_keys(), 0);
    }

    /// Bearer tokens resolve to the user and are budgeted per user
    #[actix_web::test]
    async fn test_me_with_bearer_token() {
        let config = fixtures::config();
        let token = fixtures::bearer_token(&config, "user-1", &["bots:read", "bots:write"]);
        let app = test::init_service(HttpServer::create_app(state())).await;

        let req = test::TestRequest::get()
            .uri("/api/v1/me")
            .insert_header(("authorization", format!("Bearer {}", token)))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(header(&res, "x-ratelimit-limit").as_deref(), Some("120"));
        assert_eq!(header(&res, "x-ratelimit-remaining").as_deref(), Some("119"));
        assert!(header(&res, "x-cache").is_none());

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["data"]["user_id"], "user-1");
        assert_eq!(body["data"]["kind"], "bearer");
        assert_eq!(body["data"]["scopes"][1], "bots:write");
    }

    /// The session cookie carries the same token format
    #[actix_web::test]
    async fn test_me_with_session_cookie() {
        let config = fixtures::config();
        let token = fixtures::bearer_token(&config, "user-2", &[]);
        let app = test::init_service(HttpServer::create_app(state())).await;

        let req = test::TestRequest::get()
            .uri("/api/v1/me")
            .insert_header(("cookie", format!("theme=dark; {}={}", SESSION_COOKIE, token)))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["user_id"], "user-2");
        assert_eq!(body["data"]["kind"], "session");
    }

    /// API keys resolve to their owner and carry their key id
    #[actix_web::test]
    async fn test_me_with_api_key() {
        let app = test::init_service(HttpServer::create_app(state())).await;

        let req = test::TestRequest::get()
            .uri("/api/v1/me")
            .insert_header(("x-api-key", RAW_API_KEY))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["user_id"], "user-7");
        assert_eq!(body["data"]["kind"], "api_key");
        assert_eq!(body["data"]["key_id"], "ci");

        let req = test::TestRequest::get()
            .uri("/api/v1/me")
            .insert_header(("x-api-key", "cbk_live_wrong"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    /// Expired tokens are rejected without detail about why
    #[actix_web::test]
    async fn test_expired_token_rejected() {
        let config = fixtures::config();
        let jwt = JwtAuthenticator::from_config(config.auth());
        let issued = chrono::Utc::now().timestamp() as u64 - 7200;
        let token = jwt
            .sign(&Claims {
                sub: "user-1".to_string(),
                iss: config.auth().jwt_issuer.clone(),
                iat: issued,
                exp: issued + 60,
                scopes: vec![],
            })
            .unwrap();
        let app = test::init_service(HttpServer::create_app(state())).await;

        let req = test::TestRequest::get()
            .uri("/api/v1/me")
            .insert_header(("authorization", format!("Bearer {}", token)))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let body: ErrorResponse = test::read_body_json(res).await;
        assert_eq!(body.error.message, "Invalid or expired token");
    }

    /// Scopes are cached per caller; the hit still spends rate budget
    #[actix_web::test]
    async fn test_session_scopes_cached() {
        let config = fixtures::config();
        let state = state();
        let app = test::init_service(HttpServer::create_app(state.clone())).await;

        let request = |user: &str| {
            let token = fixtures::bearer_token(&config, user, &["bots:read"]);
            test::TestRequest::get()
                .uri("/api/v1/session/scopes")
                .insert_header(("authorization", format!("Bearer {}", token)))
                .to_request()
        };

        let res = test::call_service(&app, request("user-1")).await;
        assert_eq!(header(&res, "x-cache").as_deref(), Some("MISS"));
        let first: Value = test::read_body_json(res).await;

        let res = test::call_service(&app, request("user-1")).await;
        assert_eq!(header(&res, "x-cache").as_deref(), Some("HIT"));
        assert_eq!(header(&res, "x-ratelimit-remaining").as_deref(), Some("118"));
        let second: Value = test::read_body_json(res).await;
        assert_eq!(first["data"]["generated_at"], second["data"]["generated_at"]);

        let res = test::call_service(&app, request("user-3")).await;
        assert_eq!(header(&res, "x-cache").as_deref(), Some("MISS"));
        let other: Value = test::read_body_json(res).await;
        assert_eq!(other["data"]["user_id"], "user-3");

        assert_eq!(state.cache.len(), 2);
    }

    /// The 121st request inside the window is rejected with a retry hint
    #[actix_web::test]
    async fn test_rate_limit_exhaustion() {
        let config = fixtures::config();
        let token = fixtures::bearer_token(&config, "user-1", &[]);
        let app = test::init_service(HttpServer::create_app(state())).await;

        let request = || {
            test::TestRequest::get()
                .uri("/api/v1/me")
                .insert_header(("authorization", format!("Bearer {}", token)))
                .to_request()
        };

        for _ in 0..120 {
            let res = test::call_service(&app, request()).await;
            assert_eq!(res.status(), StatusCode::OK);
        }

        let res = test::call_service(&app, request()).await;
        assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);
        let retry_after: u64 = header(&res, "retry-after").unwrap().parse().unwrap();
        assert!((1..=60).contains(&retry_after));

        let body: ErrorResponse = test::read_body_json(res).await;
        assert_eq!(body.error.code, "RATE_LIMITED");
    }

    /// Preflight is answered by the CORS layer without credentials
    #[actix_web::test]
    async fn test_preflight() {
        let state = state();
        let app = test::init_service(HttpServer::create_app(state.clone())).await;

        let req = test::TestRequest::default()
            .method(actix_web::http::Method::OPTIONS)
            .uri("/api/v1/me")
            .insert_header(("origin", "https://dashboard.example.com"))
            .insert_header(("access-control-request-method", "GET"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert!(res.status().is_success());
        assert_eq!(
            header(&res, "access-control-allow-origin").as_deref(),
            Some("https://dashboard.example.com")
        );
        assert!(header(&res, "access-control-allow-methods").unwrap().contains("GET"));
        assert_eq!(state.limiter.tracked_keys(), 0);
    }

    /// A preflight from an origin outside the allow-list learns nothing
    #[actix_web::test]
    async fn test_preflight_from_disallowed_origin() {
        let state = state();
        let app = test::init_service(HttpServer::create_app(state.clone())).await;

        let req = test::TestRequest::default()
            .method(actix_web::http::Method::OPTIONS)
            .uri("/api/v1/me")
            .insert_header(("origin", "https://evil.example"))
            .insert_header(("access-control-request-method", "DELETE"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert!(res.status().is_client_error());
        assert!(header(&res, "access-control-allow-origin").is_none());
        assert!(header(&res, "access-control-allow-methods").is_none());
        assert_eq!(state.limiter.tracked_keys(), 0);
    }

    /// Cross-origin callers can read the gateway headers
    #[actix_web::test]
    async fn test_cross_origin_request_exposes_gateway_headers() {
        let config = fixtures::config();
        let token = fixtures::bearer_token(&config, "user-1", &[]);
        let app = test::init_service(HttpServer::create_app(state())).await;

        let req = test::TestRequest::get()
            .uri("/api/v1/me")
            .insert_header(("origin", "https://dashboard.example.com"))
            .insert_header(("authorization", format!("Bearer {}", token)))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            header(&res, "access-control-allow-origin").as_deref(),
            Some("https://dashboard.example.com")
        );
        let exposed = header(&res, "access-control-expose-headers").unwrap();
        assert!(exposed.contains("x-ratelimit-remaining"));
        assert_eq!(header(&res, "x-ratelimit-remaining").as_deref(), Some("119"));
    }
}
