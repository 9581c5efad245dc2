//! In-memory conversation repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{
    ConversationId, DomainError, ErrorCode, MessageId, Timestamp, UserId,
};
use crate::ports::{
    ConversationRecord, ConversationRepository, ConversationSummary, NewMessage, StoredMessage,
};

#[derive(Debug, Clone)]
struct StoredConversation {
    record: ConversationRecord,
    messages: Vec<StoredMessage>,
}

/// In-memory storage for conversations and their messages
#[derive(Debug, Clone, Default)]
pub struct InMemoryConversationRepository {
    conversations: Arc<RwLock<HashMap<ConversationId, StoredConversation>>>,
}

impl InMemoryConversationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored conversations.
    pub async fn conversation_count(&self) -> usize {
        self.conversations.read().await.len()
    }
}

#[async_trait]
impl ConversationRepository for InMemoryConversationRepository {
    async fn create(
        &self,
        user_id: &UserId,
        title: &str,
    ) -> Result<ConversationRecord, DomainError> {
        let record = ConversationRecord {
            id: ConversationId::new(),
            user_id: user_id.clone(),
            title: title.to_string(),
            created_at: Timestamp::now(),
            last_message_at: None,
        };

        self.conversations.write().await.insert(
            record.id,
            StoredConversation {
                record: record.clone(),
                messages: Vec::new(),
            },
        );
        Ok(record)
    }

    async fn find_by_id(
        &self,
        id: &ConversationId,
    ) -> Result<Option<ConversationRecord>, DomainError> {
        let conversations = self.conversations.read().await;
        Ok(conversations.get(id).map(|c| c.record.clone()))
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<ConversationSummary>, DomainError> {
        let conversations = self.conversations.read().await;
        let mut summaries: Vec<ConversationSummary> = conversations
            .values()
            .filter(|c| &c.record.user_id == user_id)
            .map(|c| ConversationSummary {
                conversation: c.record.clone(),
                last_message: c.messages.last().cloned(),
            })
            .collect();

        summaries.sort_by(|a, b| b.conversation.created_at.cmp(&a.conversation.created_at));
        Ok(summaries)
    }

    async fn messages(&self, id: &ConversationId) -> Result<Vec<StoredMessage>, DomainError> {
        let conversations = self.conversations.read().await;
        Ok(conversations
            .get(id)
            .map(|c| c.messages.clone())
            .unwrap_or_default())
    }

    async fn append_message(
        &self,
        id: &ConversationId,
        message: NewMessage,
    ) -> Result<StoredMessage, DomainError> {
        let mut conversations = self.conversations.write().await;
        let conversation = conversations.get_mut(id).ok_or_else(|| {
            DomainError::new(ErrorCode::ConversationNotFound, "Conversation not found")
                .with_detail("conversation_id", id.to_string())
        })?;

        let stored = StoredMessage {
            id: MessageId::new(),
            conversation_id: *id,
            role: message.role,
            content: message.content,
            intent: message.intent,
            created_at: Timestamp::now(),
        };

        conversation.record.last_message_at = Some(stored.created_at);
        conversation.messages.push(stored.clone());
        Ok(stored)
    }

    async fn delete(&self, id: &ConversationId) -> Result<bool, DomainError> {
        Ok(self.conversations.write().await.remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::routing::{Intent, TurnRole};

    fn user() -> UserId {
        UserId::new("user-1").unwrap()
    }

    #[tokio::test]
    async fn messages_are_returned_in_append_order() {
        let repo = InMemoryConversationRepository::new();
        let conversation = repo.create(&user(), "Where is my order?").await.unwrap();

        repo.append_message(&conversation.id, NewMessage::user("Where is my order?"))
            .await
            .unwrap();
        repo.append_message(
            &conversation.id,
            NewMessage::assistant("It shipped.", Intent::Order),
        )
        .await
        .unwrap();

        let messages = repo.messages(&conversation.id).await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, TurnRole::User);
        assert_eq!(messages[1].intent, Some(Intent::Order));
    }

    #[tokio::test]
    async fn append_bumps_last_message_time() {
        let repo = InMemoryConversationRepository::new();
        let conversation = repo.create(&user(), "t").await.unwrap();
        assert!(conversation.last_message_at.is_none());

        let stored = repo
            .append_message(&conversation.id, NewMessage::user("hi"))
            .await
            .unwrap();

        let reloaded = repo.find_by_id(&conversation.id).await.unwrap().unwrap();
        assert_eq!(reloaded.last_message_at, Some(stored.created_at));
    }

    #[tokio::test]
    async fn append_to_missing_conversation_fails() {
        let repo = InMemoryConversationRepository::new();

        let err = repo
            .append_message(&ConversationId::new(), NewMessage::user("hi"))
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::ConversationNotFound);
    }

    #[tokio::test]
    async fn list_includes_last_message_and_filters_by_owner() {
        let repo = InMemoryConversationRepository::new();
        let mine = repo.create(&user(), "mine").await.unwrap();
        repo.create(&UserId::new("someone-else").unwrap(), "theirs")
            .await
            .unwrap();
        repo.append_message(&mine.id, NewMessage::user("latest"))
            .await
            .unwrap();

        let list = repo.list_for_user(&user()).await.unwrap();

        assert_eq!(list.len(), 1);
        assert_eq!(list[0].conversation.title, "mine");
        assert_eq!(list[0].last_message.as_ref().unwrap().content, "latest");
    }

    #[tokio::test]
    async fn delete_reports_whether_anything_was_removed() {
        let repo = InMemoryConversationRepository::new();
        let conversation = repo.create(&user(), "t").await.unwrap();

        assert!(repo.delete(&conversation.id).await.unwrap());
        assert!(!repo.delete(&conversation.id).await.unwrap());
        assert_eq!(repo.conversation_count().await, 0);
    }
}
