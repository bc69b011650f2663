//! HTTP response handling for errors

use super::types::GatewayError;
use actix_web::http::StatusCode;
use actix_web::http::header::{HeaderName, HeaderValue, RETRY_AFTER};
use actix_web::{HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};

const GENERIC_INTERNAL_MESSAGE: &str = "An internal error occurred";

impl GatewayError {
    /// Stable machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            GatewayError::BadRequest(_) => "BAD_REQUEST",
            GatewayError::Unauthorized(_) | GatewayError::Jwt(_) => "UNAUTHORIZED",
            GatewayError::Forbidden(_) => "FORBIDDEN",
            GatewayError::NotFound(_) => "NOT_FOUND",
            GatewayError::Conflict(_) => "CONFLICT",
            GatewayError::RateLimited { .. } => "RATE_LIMITED",
            GatewayError::Config(_)
            | GatewayError::Internal(_)
            | GatewayError::Serialization(_)
            | GatewayError::Io(_) => "INTERNAL_ERROR",
        }
    }

    /// Message shown to the caller. Client errors carry the raiser's message
    /// verbatim; server-side detail is never exposed.
    pub fn public_message(&self) -> String {
        match self {
            GatewayError::BadRequest(msg)
            | GatewayError::Unauthorized(msg)
            | GatewayError::Forbidden(msg)
            | GatewayError::NotFound(msg)
            | GatewayError::Conflict(msg) => msg.clone(),
            GatewayError::Jwt(_) => "Invalid or expired token".to_string(),
            GatewayError::RateLimited { .. } => "Too many requests".to_string(),
            _ => GENERIC_INTERNAL_MESSAGE.to_string(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            GatewayError::RateLimited {
                limit,
                retry_after_secs,
            } => Some(serde_json::json!({
                "limit": limit,
                "retry_after_secs": retry_after_secs,
            })),
            _ => None,
        }
    }
}

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::BadRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::Unauthorized(_) | GatewayError::Jwt(_) => StatusCode::UNAUTHORIZED,
            GatewayError::Forbidden(_) => StatusCode::FORBIDDEN,
            GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::Conflict(_) => StatusCode::CONFLICT,
            GatewayError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = ErrorResponse {
            error: ErrorDetail {
                message: self.public_message(),
                code: self.code().to_string(),
                details: self.details(),
            },
        };

        let mut builder = HttpResponse::build(self.status_code());
        if let GatewayError::RateLimited {
            limit,
            retry_after_secs,
        } = self
        {
            builder
                .insert_header((RETRY_AFTER, retry_after_secs.to_string()))
                .insert_header((
                    HeaderName::from_static("x-ratelimit-limit"),
                    HeaderValue::from(*limit),
                ))
                .insert_header((
                    HeaderName::from_static("x-ratelimit-reset"),
                    HeaderValue::from(*retry_after_secs),
                ));
        }
        builder.json(body)
    }
}

/// Standard error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub message: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// Render an error that did not originate as a `GatewayError` (for example
    /// an actix extractor failure) in the stable shape. Server errors are masked.
    pub fn from_foreign(status: StatusCode, message: &str) -> HttpResponse {
        let (status, code, message) = if status.is_server_error() {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR".to_string(),
                GENERIC_INTERNAL_MESSAGE.to_string(),
            )
        } else {
            let code = status
                .canonical_reason()
                .unwrap_or("Client Error")
                .to_uppercase()
                .replace([' ', '-'], "_");
            (status, code, message.to_string())
        };

        HttpResponse::build(status).json(ErrorResponse {
            error: ErrorDetail {
                message,
                code,
                details: None,
            },
        })
    }
}
