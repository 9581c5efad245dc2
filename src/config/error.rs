//! Configuration errors

use std::time::Duration;
use thiserror::Error;

/// Loading failed before validation could run.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// A loaded value is out of range or inconsistent with another.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Request timeout must be between 1 and 300 seconds")]
    InvalidTimeout,

    #[error("Invalid socket address: {0}")]
    InvalidSocketAddr(String),

    #[error("Database URL must use the postgres:// or postgresql:// scheme")]
    InvalidDatabaseUrl,

    #[error("Pool max_connections must be between 1 and 100")]
    InvalidPoolSize,

    #[error("No AI provider configured")]
    NoAiProviderConfigured,

    #[error("AI timeout must be between 1 and 120 seconds")]
    InvalidAiTimeout,

    #[error("AI max_retries {0} exceeds the limit of {1}")]
    TooManyRetries(u32, u32),

    #[error(
        "Request timeout {request:?} does not cover worst-case routing {routing:?} plus {margin:?}"
    )]
    RequestTimeoutTooShort {
        request: Duration,
        routing: Duration,
        margin: Duration,
    },

    #[error("Rate limit needs at least one request per window of at least one second")]
    InvalidRateLimit,
}
