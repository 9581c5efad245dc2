//! Data Transfer Objects for chat endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::{ConversationDetail, SendMessageResult};
use crate::domain::foundation::{ConversationId, MessageId, Timestamp, UserId};
use crate::domain::routing::{Intent, TurnRole};
use crate::ports::{ConversationRecord, ConversationSummary, StoredMessage};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to send a customer message.
///
/// Fields are optional so that missing values produce this API's 400 body
/// instead of an extractor rejection.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub message: Option<String>,
    pub user_id: Option<String>,
    pub conversation_id: Option<String>,
}

/// Query parameters for listing conversations.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListConversationsParams {
    pub user_id: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Reply to a sent message.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageResponse {
    pub response: String,
    pub agent_type: Intent,
    pub conversation_id: ConversationId,
}

impl From<SendMessageResult> for SendMessageResponse {
    fn from(result: SendMessageResult) -> Self {
        Self {
            response: result.reply,
            agent_type: result.intent,
            conversation_id: result.conversation_id,
        }
    }
}

/// One stored message.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub id: MessageId,
    pub conversation_id: ConversationId,
    pub role: TurnRole,
    pub content: String,
    pub agent_type: Option<Intent>,
    pub timestamp: Timestamp,
}

impl From<StoredMessage> for MessageResponse {
    fn from(message: StoredMessage) -> Self {
        Self {
            id: message.id,
            conversation_id: message.conversation_id,
            role: message.role,
            content: message.content,
            agent_type: message.intent,
            timestamp: message.created_at,
        }
    }
}

/// Conversation header with an attached message list.
///
/// List views carry at most the latest message; detail views carry the full
/// transcript oldest first.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationResponse {
    pub id: ConversationId,
    pub user_id: UserId,
    pub title: String,
    pub created_at: Timestamp,
    pub last_message_at: Option<Timestamp>,
    pub messages: Vec<MessageResponse>,
}

impl ConversationResponse {
    fn from_parts(record: ConversationRecord, messages: Vec<StoredMessage>) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            title: record.title,
            created_at: record.created_at,
            last_message_at: record.last_message_at,
            messages: messages.into_iter().map(MessageResponse::from).collect(),
        }
    }
}

impl From<ConversationSummary> for ConversationResponse {
    fn from(summary: ConversationSummary) -> Self {
        Self::from_parts(
            summary.conversation,
            summary.last_message.into_iter().collect(),
        )
    }
}

impl From<ConversationDetail> for ConversationResponse {
    fn from(detail: ConversationDetail) -> Self {
        Self::from_parts(detail.conversation, detail.messages)
    }
}
