//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `SUPPORT_DESK` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use support_desk::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod ai;
mod database;
mod error;
mod rate_limit;
mod server;

pub use ai::{AiConfig, AiProvider, MAX_RETRIES_LIMIT};
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use rate_limit::RateLimitConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;
use std::time::Duration;

/// Slack the request deadline must leave after the slowest routing path,
/// for persistence and record reads.
pub const ROUTING_MARGIN: Duration = Duration::from_secs(5);

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL connection)
    pub database: DatabaseConfig,

    /// Completion backends (OpenAI/Gemini)
    #[serde(default)]
    pub ai: AiConfig,

    /// Per-client request quota
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `SUPPORT_DESK` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `SUPPORT_DESK__SERVER__PORT=3001` -> `server.port = 3001`
    /// - `SUPPORT_DESK__DATABASE__URL=...` -> `database.url = ...`
    /// - `SUPPORT_DESK__AI__GEMINI_API_KEY=...` -> `ai.gemini_api_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SUPPORT_DESK")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.ai.validate()?;
        self.rate_limit.validate()?;
        self.check_request_budget()
    }

    /// The HTTP deadline must outlast every completion call one message can
    /// trigger, plus [`ROUTING_MARGIN`].
    fn check_request_budget(&self) -> Result<(), ValidationError> {
        let request = self.server.request_timeout();
        let routing = self.ai.worst_case_routing();
        if request < routing + ROUTING_MARGIN {
            return Err(ValidationError::RequestTimeoutTooShort {
                request,
                routing,
                margin: ROUTING_MARGIN,
            });
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var("SUPPORT_DESK__DATABASE__URL", "postgresql://test@localhost/test");
        env::set_var("SUPPORT_DESK__AI__GEMINI_API_KEY", "AIza-test");
    }

    fn clear_env() {
        for key in [
            "SUPPORT_DESK__DATABASE__URL",
            "SUPPORT_DESK__AI__GEMINI_API_KEY",
            "SUPPORT_DESK__AI__PRIMARY_CLASSIFIER",
            "SUPPORT_DESK__SERVER__PORT",
            "SUPPORT_DESK__SERVER__ENVIRONMENT",
            "SUPPORT_DESK__SERVER__REQUEST_TIMEOUT_SECS",
            "SUPPORT_DESK__AI__TIMEOUT_SECS",
            "SUPPORT_DESK__RATE_LIMIT__MAX_REQUESTS",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.expect("config should load");
        assert_eq!(config.database.url, "postgresql://test@localhost/test");
        assert_eq!(config.ai.gemini_api_key.as_deref(), Some("AIza-test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_apply() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.ai.primary_classifier, AiProvider::OpenAI);
        assert_eq!(config.ai.timeout_secs, 20);
        assert_eq!(config.server.request_timeout_secs, 75);
        assert_eq!(config.rate_limit.max_requests, 100);
        assert_eq!(config.rate_limit.window_secs, 900);
    }

    #[test]
    fn test_nested_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("SUPPORT_DESK__SERVER__ENVIRONMENT", "production");
        env::set_var("SUPPORT_DESK__SERVER__PORT", "8080");
        env::set_var("SUPPORT_DESK__AI__PRIMARY_CLASSIFIER", "gemini");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.ai.primary_classifier, AiProvider::Gemini);
    }

    #[test]
    fn test_missing_database_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        assert!(AppConfig::load().is_err());
    }

    #[test]
    fn test_rate_limit_override() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("SUPPORT_DESK__RATE_LIMIT__MAX_REQUESTS", "20");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.rate_limit.max_requests, 20);
        assert_eq!(config.rate_limit.window_secs, 900);
    }

    fn config_with(request_timeout_secs: u64, ai_timeout_secs: u64) -> AppConfig {
        AppConfig {
            server: ServerConfig {
                request_timeout_secs,
                ..Default::default()
            },
            database: DatabaseConfig {
                url: "postgres://localhost/desk".to_string(),
                ..Default::default()
            },
            ai: AiConfig {
                openai_api_key: Some("sk-test".to_string()),
                gemini_api_key: Some("AIza-test".to_string()),
                timeout_secs: ai_timeout_secs,
                ..Default::default()
            },
            rate_limit: RateLimitConfig::default(),
        }
    }

    #[test]
    fn test_default_deadlines_fit_request_timeout() {
        let config = config_with(ServerConfig::default().request_timeout_secs, 20);
        assert!(config.validate().is_ok());
        assert!(
            config.server.request_timeout() >= config.ai.worst_case_routing() + ROUTING_MARGIN
        );
    }

    #[test]
    fn test_request_timeout_shorter_than_routing_is_rejected() {
        // Two classifiers and a responder at 20s each need 65s.
        let err = config_with(30, 20).validate().unwrap_err();
        assert!(matches!(
            err,
            ValidationError::RequestTimeoutTooShort { request, routing, .. }
                if request == Duration::from_secs(30) && routing == Duration::from_secs(60)
        ));

        assert!(config_with(64, 20).validate().is_err());
        assert!(config_with(65, 20).validate().is_ok());
    }

    #[test]
    fn test_shorter_ai_timeout_fits_shorter_request_timeout() {
        assert!(config_with(30, 8).validate().is_ok());
    }

    #[test]
    fn test_env_with_short_request_timeout_fails_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("SUPPORT_DESK__SERVER__REQUEST_TIMEOUT_SECS", "30");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::RequestTimeoutTooShort { .. })
        ));
    }
}
