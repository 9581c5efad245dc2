//! Axum router configuration for chat endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    delete_conversation, get_conversation, list_conversations, send_message, ChatAppState,
};

/// Create the chat API router, mounted at `/api/chat`.
///
/// # Routes
/// - `POST /messages` - Send a message, receive the routed reply
/// - `GET /conversations?userId=` - List a customer's conversations
/// - `GET /conversations/:id` - Conversation with messages
/// - `DELETE /conversations/:id` - Delete a conversation
pub fn chat_routes() -> Router<ChatAppState> {
    Router::new()
        .route("/messages", post(send_message))
        .route("/conversations", get(list_conversations))
        .route(
            "/conversations/:id",
            get(get_conversation).delete(delete_conversation),
        )
}

/// Chat router nested under `/chat`, ready to mount at `/api`.
pub fn chat_router() -> Router<ChatAppState> {
    Router::new().nest("/chat", chat_routes())
}
