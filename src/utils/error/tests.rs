//! Tests for error handling

use super::{ErrorResponse, GatewayError};
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;

async fn render(error: &GatewayError) -> (StatusCode, ErrorResponse) {
    let response = error.error_response();
    let status = response.status();
    let bytes = to_bytes(response.into_body()).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[test]
fn test_error_creation() {
    let error = GatewayError::unauthorized("Invalid token");
    assert!(matches!(error, GatewayError::Unauthorized(_)));

    let error = GatewayError::bad_request("Missing parameter");
    assert!(matches!(error, GatewayError::BadRequest(_)));
}

#[test]
fn test_conflict_helper() {
    let error = GatewayError::conflict("Resource already exists");
    assert!(matches!(error, GatewayError::Conflict(msg) if msg == "Resource already exists"));
}

#[test]
fn test_status_codes() {
    assert_eq!(
        GatewayError::bad_request("x").status_code(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        GatewayError::unauthorized("x").status_code(),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(GatewayError::forbidden("x").status_code(), StatusCode::FORBIDDEN);
    assert_eq!(GatewayError::not_found("x").status_code(), StatusCode::NOT_FOUND);
    assert_eq!(GatewayError::conflict("x").status_code(), StatusCode::CONFLICT);
    assert_eq!(
        GatewayError::rate_limited(3, 10).status_code(),
        StatusCode::TOO_MANY_REQUESTS
    );
    assert_eq!(
        GatewayError::internal("x").status_code(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(
        GatewayError::config("x").status_code(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[actix_web::test]
async fn test_conflict_message_is_verbatim() {
    let (status, body) = render(&GatewayError::conflict("Bot name already taken")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body.error.message, "Bot name already taken");
    assert_eq!(body.error.code, "CONFLICT");
    assert!(body.error.details.is_none());
}

#[actix_web::test]
async fn test_internal_detail_is_masked() {
    let (status, body) =
        render(&GatewayError::internal("connection refused: db-primary:5432")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body.error.code, "INTERNAL_ERROR");
    assert!(!body.error.message.contains("db-primary"));
}

#[actix_web::test]
async fn test_rate_limited_carries_retry_hint() {
    let error = GatewayError::rate_limited(3, 42);
    let response = error.error_response();
    assert_eq!(
        response.headers().get("retry-after").unwrap().to_str().unwrap(),
        "42"
    );
    assert_eq!(
        response.headers().get("x-ratelimit-limit").unwrap().to_str().unwrap(),
        "3"
    );

    let (_, body) = render(&error).await;
    assert_eq!(body.error.code, "RATE_LIMITED");
    let details = body.error.details.unwrap();
    assert_eq!(details["retry_after_secs"], 42);
    assert_eq!(details["limit"], 3);
}

#[actix_web::test]
async fn test_foreign_client_error_keeps_status() {
    let response = ErrorResponse::from_foreign(StatusCode::PAYLOAD_TOO_LARGE, "too big");
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let bytes = to_bytes(response.into_body()).await.unwrap();
    let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body.error.code, "PAYLOAD_TOO_LARGE");
    assert_eq!(body.error.message, "too big");
}

#[actix_web::test]
async fn test_foreign_server_error_is_masked() {
    let response = ErrorResponse::from_foreign(StatusCode::BAD_GATEWAY, "upstream 10.0.0.3 down");
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let bytes = to_bytes(response.into_body()).await.unwrap();
    let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body.error.code, "INTERNAL_ERROR");
    assert!(!body.error.message.contains("10.0.0.3"));
}

#[test]
fn test_client_error_classification() {
    assert!(GatewayError::conflict("x").is_client_error());
    assert!(GatewayError::rate_limited(1, 1).is_client_error());
    assert!(!GatewayError::internal("x").is_client_error());
}
