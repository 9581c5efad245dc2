//! HTTP handlers for the responder catalog.

use axum::extract::Path;
use axum::response::{IntoResponse, Json};

use crate::adapters::http::error::ApiError;
use crate::domain::routing::{agent_capabilities, agent_catalog, Intent};

/// GET /api/agents - The three responders in display order
pub async fn list_agents() -> impl IntoResponse {
    Json(agent_catalog())
}

/// GET /api/agents/:type/capabilities - Capabilities and record tools of one responder
pub async fn get_agent_capabilities(
    Path(agent_type): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    Intent::from_label(&agent_type)
        .and_then(agent_capabilities)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Agent not found: {}", agent_type)))
}
