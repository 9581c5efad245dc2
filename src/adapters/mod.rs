//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the routing core to external systems:
//! - `ai` - Completion backends (OpenAI, Gemini, mock)
//! - `memory` - In-memory record store and transcript repository
//! - `postgres` - PostgreSQL readers and repositories, migrations
//! - `http` - REST API (axum)

pub mod ai;
pub mod http;
pub mod memory;
pub mod postgres;
