//! Application layer - routing services and command/query handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! `routing` owns the classify-and-dispatch core; `handlers` wraps it with
//! transcript persistence.

pub mod handlers;
pub mod routing;

pub use handlers::{
    ConversationDetail, DeleteConversationCommand, DeleteConversationHandler,
    GetConversationHandler, GetConversationQuery, ListConversationsHandler,
    ListConversationsQuery, SendMessageCommand, SendMessageError, SendMessageHandler,
    SendMessageResult,
};
pub use routing::{IntentRouter, ResponderSet};
