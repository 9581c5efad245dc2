//! Chat service handlers.
//!
//! Sending a message persists both sides of the exchange around a call to
//! the intent router. The query handlers expose stored transcripts.

mod conversation_queries;
mod send_message;

pub use conversation_queries::{
    ConversationDetail, DeleteConversationCommand, DeleteConversationHandler,
    GetConversationHandler, GetConversationQuery, ListConversationsHandler,
    ListConversationsQuery,
};
pub use send_message::{
    conversation_title, SendMessageCommand, SendMessageError, SendMessageHandler,
    SendMessageResult, TITLE_MAX_CHARS,
};
