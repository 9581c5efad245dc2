//! Conversation repository port - persistence of chat transcripts.
//!
//! The chat service stores every inbound message and every routed reply.
//! The routing core itself never writes; it only receives the history the
//! service reads back from here.
//!
//! # Design
//!
//! - Messages are append-only and returned oldest first
//! - Assistant messages carry the intent that produced them
//! - Deleting a conversation deletes its messages

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ConversationId, DomainError, MessageId, Timestamp, UserId};
use crate::domain::routing::{ConversationTurn, Intent, TurnRole};

/// Repository port for conversations and their messages.
#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Creates an empty conversation owned by `user_id`.
    async fn create(
        &self,
        user_id: &UserId,
        title: &str,
    ) -> Result<ConversationRecord, DomainError>;

    /// Finds a conversation by ID.
    async fn find_by_id(
        &self,
        id: &ConversationId,
    ) -> Result<Option<ConversationRecord>, DomainError>;

    /// Lists a user's conversations, most recently created first, each with
    /// its latest message.
    async fn list_for_user(&self, user_id: &UserId)
        -> Result<Vec<ConversationSummary>, DomainError>;

    /// All messages of a conversation, oldest first.
    async fn messages(&self, id: &ConversationId) -> Result<Vec<StoredMessage>, DomainError>;

    /// Appends a message and bumps the conversation's `last_message_at`.
    async fn append_message(
        &self,
        id: &ConversationId,
        message: NewMessage,
    ) -> Result<StoredMessage, DomainError>;

    /// Deletes a conversation and its messages. Returns false if it did not
    /// exist.
    async fn delete(&self, id: &ConversationId) -> Result<bool, DomainError>;
}

/// Stored conversation header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationRecord {
    pub id: ConversationId,
    pub user_id: UserId,
    pub title: String,
    pub created_at: Timestamp,
    pub last_message_at: Option<Timestamp>,
}

/// Conversation header plus its most recent message, for list views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSummary {
    #[serde(flatten)]
    pub conversation: ConversationRecord,
    pub last_message: Option<StoredMessage>,
}

/// Message to append.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMessage {
    pub role: TurnRole,
    pub content: String,
    /// Intent that produced an assistant reply; `None` for user messages.
    pub intent: Option<Intent>,
}

impl NewMessage {
    /// A customer message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            content: content.into(),
            intent: None,
        }
    }

    /// A routed assistant reply.
    pub fn assistant(content: impl Into<String>, intent: Intent) -> Self {
        Self {
            role: TurnRole::Assistant,
            content: content.into(),
            intent: Some(intent),
        }
    }
}

/// A persisted message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredMessage {
    pub id: MessageId,
    pub conversation_id: ConversationId,
    pub role: TurnRole,
    pub content: String,
    #[serde(rename = "agentType")]
    pub intent: Option<Intent>,
    pub created_at: Timestamp,
}

impl StoredMessage {
    /// Projects the message onto a history turn.
    pub fn to_turn(&self) -> ConversationTurn {
        ConversationTurn::new(self.role, self.content.clone())
    }
}
