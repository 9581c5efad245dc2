//! HTTP adapter for the responder catalog.
//!
//! - `GET /api/agents`
//! - `GET /api/agents/:type/capabilities`

pub mod handlers;
pub mod routes;

pub use routes::agents_router;
