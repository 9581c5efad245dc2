//! Command and query handlers.

pub mod chat;

pub use chat::{
    ConversationDetail, DeleteConversationCommand, DeleteConversationHandler,
    GetConversationHandler, GetConversationQuery, ListConversationsHandler,
    ListConversationsQuery, SendMessageCommand, SendMessageError, SendMessageHandler,
    SendMessageResult,
};
