//! HTTP adapter for chat endpoints.
//!
//! - `POST /api/chat/messages` - Send a message and receive the routed reply
//! - `GET /api/chat/conversations?userId=` - List conversations
//! - `GET /api/chat/conversations/:id` - Conversation with messages
//! - `DELETE /api/chat/conversations/:id` - Delete a conversation

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::ChatAppState;
pub use routes::{chat_router, chat_routes};
