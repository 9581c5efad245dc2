//! Rate limiting port for protecting the chat API from floods.
//!
//! Requests are counted per client in fixed windows. Implementations decide
//! where the counters live (process memory, shared store).

use async_trait::async_trait;

/// Port for per-client request limiting.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Counts one request from `client` and reports whether it may proceed.
    async fn check(&self, client: &str) -> Result<RateLimitDecision, RateLimitError>;
}

/// Outcome of a rate limit check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateLimitDecision {
    /// Request is within quota.
    Allowed {
        /// Maximum requests per window.
        limit: u32,
        /// Requests left in the current window.
        remaining: u32,
    },
    /// Quota exhausted for the current window.
    Denied {
        /// Maximum requests per window.
        limit: u32,
        /// Whole seconds until the window resets, at least 1.
        retry_after_secs: u64,
    },
}

impl RateLimitDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitDecision::Allowed { .. })
    }
}

/// Errors raised by a rate limiter backend.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RateLimitError {
    #[error("rate limiter unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_reports_allowance() {
        assert!(RateLimitDecision::Allowed { limit: 5, remaining: 4 }.is_allowed());
        assert!(!RateLimitDecision::Denied {
            limit: 5,
            retry_after_secs: 30
        }
        .is_allowed());
    }

    #[test]
    fn error_displays_cause() {
        let err = RateLimitError::Unavailable("store offline".to_string());
        assert_eq!(err.to_string(), "rate limiter unavailable: store offline");
    }
}
