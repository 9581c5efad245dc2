//! Axum router configuration for agent endpoints.

use axum::routing::get;
use axum::Router;

use super::handlers::{get_agent_capabilities, list_agents};

/// Agent catalog router, ready to mount at `/api`.
///
/// Stateless, so it merges into any application state.
///
/// # Routes
/// - `GET /agents` - List responders
/// - `GET /agents/:type/capabilities` - Capabilities of one responder
pub fn agents_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/agents", get(list_agents))
        .route("/agents/:type/capabilities", get(get_agent_capabilities))
}
