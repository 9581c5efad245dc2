//! Liveness endpoint.

use axum::response::{IntoResponse, Json};
use axum::routing::get;
use axum::Router;
use serde::Serialize;

use crate::domain::foundation::Timestamp;

/// Service name reported by the health check.
pub const SERVICE_NAME: &str = "AI Customer Support API";

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: Timestamp,
    pub service: &'static str,
}

/// GET /api/health
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        timestamp: Timestamp::now(),
        service: SERVICE_NAME,
    })
}

pub fn health_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/health", get(health_check))
}
