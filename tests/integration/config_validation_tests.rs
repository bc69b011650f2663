//! Configuration validation integration tests
//!
//! Tests for configuration validation across all config components.

#[cfg(test)]
mod tests {
    use chatbot_gateway::GatewayError;
    use chatbot_gateway::config::models::{ApiKeyConfig, CorsConfig, GatewayConfig};
    use chatbot_gateway::config::{Config, Validate};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_valid_gateway_config() -> GatewayConfig {
        let mut config = GatewayConfig::default();
        config.auth.jwt_secret = "a-valid-secret-of-at-least-32-characters".to_string();
        config.server.cors = CorsConfig {
            allowed_origins: vec!["https://dashboard.example.com".to_string()],
            allow_credentials: true,
            ..Default::default()
        };
        config
    }

    /// Test that valid gateway config passes validation
    #[test]
    fn test_valid_gateway_config() {
        let config = create_valid_gateway_config();
        assert!(config.validate().is_ok());
    }

    /// Test that server port 0 fails validation
    #[test]
    fn test_gateway_config_port_zero() {
        let mut config = create_valid_gateway_config();
        config.server.port = 0;

        let result = config.validate();
        assert!(result.unwrap_err().contains("server"));
    }

    /// Test that a zero window fails validation
    #[test]
    fn test_gateway_config_zero_window() {
        let mut config = create_valid_gateway_config();
        config.rate_limit.window_ms = 0;

        let err = config.validate().unwrap_err();
        assert!(err.contains("window_ms"));
    }

    /// Test that an unparseable log filter fails validation
    #[test]
    fn test_gateway_config_bad_log_level() {
        let mut config = create_valid_gateway_config();
        config.logging.level = "info,bots=loudest".to_string();

        assert!(config.validate().unwrap_err().starts_with("logging:"));
    }

    /// Test that API keys must be stored as digests
    #[test]
    fn test_gateway_config_plaintext_api_key() {
        let mut config = create_valid_gateway_config();
        config.auth.api_keys.push(ApiKeyConfig {
            id: "ci".to_string(),
            key_hash: "cbk_live_plaintext".to_string(),
            user_id: "user-1".to_string(),
            scopes: vec![],
        });

        assert!(config.validate().unwrap_err().contains("key_hash"));
    }

    /// Test that a file with invalid values is rejected on load
    #[test]
    fn test_invalid_file_rejected() {
        let mut file = NamedTempFile::with_suffix(".yaml").unwrap();
        file.write_all(b"cache:\n  sweep_interval_secs: 0\n").unwrap();

        let err = Config::from_file(file.path()).unwrap_err();
        assert!(matches!(err, GatewayError::Config(msg) if msg.contains("sweep_interval_secs")));
    }

    /// Test that the shipped example configuration loads
    #[test]
    fn test_example_config_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/gateway.example.yaml");
        let config = Config::from_file(path).unwrap();
        assert_eq!(config.server().port, 8000);
        assert_eq!(config.rate_limit().window_ms, 60_000);
    }
}
