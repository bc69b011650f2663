//! Error handling integration tests
//!
//! Every error renders to `{"error": {"message", "code", "details"?}}`.

#[cfg(test)]
mod tests {
    use actix_web::ResponseError;
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;
    use chatbot_gateway::GatewayError;
    use chatbot_gateway::utils::error::ErrorResponse;

    async fn render(err: GatewayError) -> (StatusCode, ErrorResponse) {
        let res = err.error_response();
        let status = res.status();
        let body = to_bytes(res.into_body()).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[actix_web::test]
    async fn test_client_errors_keep_message() {
        let cases = [
            (GatewayError::bad_request("name is required"), StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            (GatewayError::not_found("Bot not found"), StatusCode::NOT_FOUND, "NOT_FOUND"),
            (GatewayError::conflict("Bot already exists"), StatusCode::CONFLICT, "CONFLICT"),
            (GatewayError::forbidden("Not your bot"), StatusCode::FORBIDDEN, "FORBIDDEN"),
        ];

        for (err, expected_status, expected_code) in cases {
            let message = err.to_string();
            let (status, body) = render(err).await;
            assert_eq!(status, expected_status);
            assert_eq!(body.error.code, expected_code);
            assert!(message.contains(&body.error.message));
            assert!(body.error.details.is_none());
        }
    }

    #[actix_web::test]
    async fn test_server_errors_are_masked() {
        let io = std::io::Error::other("disk /var/lib/bots full");
        for err in [
            GatewayError::internal("pool exhausted at db.rs:88"),
            GatewayError::config("missing secret"),
            GatewayError::from(io),
        ] {
            let (status, body) = render(err).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body.error.code, "INTERNAL_ERROR");
            assert_eq!(body.error.message, "An internal error occurred");
        }
    }

    #[actix_web::test]
    async fn test_rate_limited_carries_details() {
        let (status, body) = render(GatewayError::rate_limited(3, 42)).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        let details = body.error.details.unwrap();
        assert_eq!(details["limit"], 3);
        assert_eq!(details["retry_after_secs"], 42);
    }
}
