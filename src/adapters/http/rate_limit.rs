//! Per-client rate limiting middleware.
//!
//! Clients are identified by `X-Forwarded-For` (first hop), then
//! `X-Real-IP`, then the socket address. Allowed responses carry
//! `X-RateLimit-Limit`/`X-RateLimit-Remaining`; rejections are 429 with a
//! `retryAfter` field and a `Retry-After` header.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, Request, State};
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;

use crate::ports::{RateLimitDecision, RateLimiter};

/// Middleware state.
pub type RateLimiterState = Arc<dyn RateLimiter>;

static X_RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
static X_RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");

/// Body of a 429 response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitedResponse {
    pub code: String,
    pub message: String,
    pub retry_after: u64,
}

/// Rejects clients over quota with 429. Limiter faults let the request through.
pub async fn rate_limit_middleware(
    State(limiter): State<RateLimiterState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request,
    next: Next,
) -> Response {
    let client = client_key(request.headers(), connect_info.as_ref());

    match limiter.check(&client).await {
        Ok(RateLimitDecision::Denied {
            limit,
            retry_after_secs,
        }) => {
            tracing::warn!(client = %client, retry_after_secs, "rate limit exceeded");
            too_many_requests(limit, retry_after_secs)
        }
        Ok(RateLimitDecision::Allowed { limit, remaining }) => {
            let mut response = next.run(request).await;
            let headers = response.headers_mut();
            headers.insert(X_RATELIMIT_LIMIT.clone(), HeaderValue::from(limit));
            headers.insert(X_RATELIMIT_REMAINING.clone(), HeaderValue::from(remaining));
            response
        }
        Err(e) => {
            tracing::warn!(error = %e, "rate limiter unavailable");
            next.run(request).await
        }
    }
}

fn client_key(headers: &HeaderMap, connect_info: Option<&ConnectInfo<SocketAddr>>) -> String {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    if let Some(first) = header("x-forwarded-for").and_then(|v| v.split(',').next()) {
        return first.trim().to_string();
    }
    if let Some(real_ip) = header("x-real-ip") {
        return real_ip.to_string();
    }
    connect_info
        .map(|ci| ci.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn too_many_requests(limit: u32, retry_after_secs: u64) -> Response {
    let body = RateLimitedResponse {
        code: "RATE_LIMITED".to_string(),
        message: "Too many requests. Please try again later.".to_string(),
        retry_after: retry_after_secs,
    };
    let mut response = (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();
    let headers = response.headers_mut();
    headers.insert(X_RATELIMIT_LIMIT.clone(), HeaderValue::from(limit));
    headers.insert(X_RATELIMIT_REMAINING.clone(), HeaderValue::from(0u32));
    headers.insert(
        axum::http::header::RETRY_AFTER,
        HeaderValue::from(retry_after_secs),
    );
    response
}
