//! Conversation query handlers - list, fetch and delete transcripts.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::{ConversationId, DomainError, ErrorCode, UserId};
use crate::ports::{ConversationRecord, ConversationRepository, ConversationSummary, StoredMessage};

fn not_found(id: &ConversationId) -> DomainError {
    DomainError::new(
        ErrorCode::ConversationNotFound,
        format!("Conversation not found: {}", id),
    )
}

/// Query for a customer's conversations.
#[derive(Debug, Clone)]
pub struct ListConversationsQuery {
    pub user_id: UserId,
}

/// Lists a customer's conversations, newest first, each with its latest
/// message as a preview.
pub struct ListConversationsHandler {
    conversations: Arc<dyn ConversationRepository>,
}

impl ListConversationsHandler {
    pub fn new(conversations: Arc<dyn ConversationRepository>) -> Self {
        Self { conversations }
    }

    pub async fn handle(
        &self,
        query: ListConversationsQuery,
    ) -> Result<Vec<ConversationSummary>, DomainError> {
        self.conversations.list_for_user(&query.user_id).await
    }
}

/// A conversation with its full transcript.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationDetail {
    #[serde(flatten)]
    pub conversation: ConversationRecord,
    /// Oldest first.
    pub messages: Vec<StoredMessage>,
}

/// Query for a single conversation.
#[derive(Debug, Clone)]
pub struct GetConversationQuery {
    pub conversation_id: ConversationId,
}

/// Handler for getting a conversation with its messages.
pub struct GetConversationHandler {
    conversations: Arc<dyn ConversationRepository>,
}

impl GetConversationHandler {
    pub fn new(conversations: Arc<dyn ConversationRepository>) -> Self {
        Self { conversations }
    }

    pub async fn handle(&self, query: GetConversationQuery) -> Result<ConversationDetail, DomainError> {
        let conversation = self
            .conversations
            .find_by_id(&query.conversation_id)
            .await?
            .ok_or_else(|| not_found(&query.conversation_id))?;
        let messages = self.conversations.messages(&conversation.id).await?;

        Ok(ConversationDetail {
            conversation,
            messages,
        })
    }
}

/// Command to delete a conversation and its messages.
#[derive(Debug, Clone)]
pub struct DeleteConversationCommand {
    pub conversation_id: ConversationId,
}

/// Handler for deleting conversations.
pub struct DeleteConversationHandler {
    conversations: Arc<dyn ConversationRepository>,
}

impl DeleteConversationHandler {
    pub fn new(conversations: Arc<dyn ConversationRepository>) -> Self {
        Self { conversations }
    }

    pub async fn handle(&self, cmd: DeleteConversationCommand) -> Result<(), DomainError> {
        if self.conversations.delete(&cmd.conversation_id).await? {
            tracing::info!(conversation_id = %cmd.conversation_id, "conversation deleted");
            Ok(())
        } else {
            Err(not_found(&cmd.conversation_id))
        }
    }
}
