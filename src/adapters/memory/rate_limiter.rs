//! In-memory fixed-window rate limiter.
//!
//! Counters live in process memory, so limits are per server instance.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::ports::{RateLimitDecision, RateLimitError, RateLimiter};

#[derive(Debug, Clone, Copy)]
struct Window {
    count: u32,
    resets_at: Instant,
}

/// Allows `limit` requests per client in each `window`.
#[derive(Debug, Clone)]
pub struct InMemoryRateLimiter {
    limit: u32,
    window: Duration,
    windows: Arc<RwLock<HashMap<String, Window>>>,
}

impl InMemoryRateLimiter {
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            limit,
            window,
            windows: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of clients with a tracked window.
    pub async fn tracked_clients(&self) -> usize {
        self.windows.read().await.len()
    }
}

#[async_trait]
impl RateLimiter for InMemoryRateLimiter {
    async fn check(&self, client: &str) -> Result<RateLimitDecision, RateLimitError> {
        let now = Instant::now();
        let mut windows = self.windows.write().await;

        // Drop expired windows.
        windows.retain(|_, w| w.resets_at > now);

        let window = windows.entry(client.to_string()).or_insert(Window {
            count: 0,
            resets_at: now + self.window,
        });

        if window.count >= self.limit {
            let wait = window.resets_at.saturating_duration_since(now);
            let retry_after_secs = (wait.as_millis() as u64).div_ceil(1000).max(1);
            return Ok(RateLimitDecision::Denied {
                limit: self.limit,
                retry_after_secs,
            });
        }

        window.count += 1;
        Ok(RateLimitDecision::Allowed {
            limit: self.limit,
            remaining: self.limit - window.count,
        })
    }
}
