//! SendMessage command handler.
//!
//! Routes the customer's message through the intent router, then stores the
//! message and the routed reply alongside the intent that produced it.

use std::sync::Arc;

use thiserror::Error;

use crate::application::routing::{IntentRouter, RouteError};
use crate::domain::foundation::{ConversationId, DomainError, UserId};
use crate::domain::routing::{ConversationTurn, Intent};
use crate::ports::{ConversationRecord, ConversationRepository, NewMessage};

/// Number of characters of the first message used as a conversation title.
pub const TITLE_MAX_CHARS: usize = 50;

/// Command to send a customer message.
#[derive(Debug, Clone)]
pub struct SendMessageCommand {
    /// The customer sending the message.
    pub user_id: UserId,
    /// The message text.
    pub message: String,
    /// Existing conversation to continue; a new one is created when absent.
    pub conversation_id: Option<ConversationId>,
}

impl SendMessageCommand {
    pub fn new(user_id: UserId, message: impl Into<String>) -> Self {
        Self {
            user_id,
            message: message.into(),
            conversation_id: None,
        }
    }

    /// Continues an existing conversation.
    pub fn in_conversation(mut self, conversation_id: ConversationId) -> Self {
        self.conversation_id = Some(conversation_id);
        self
    }
}

/// Errors that can occur when sending a message.
#[derive(Debug, Clone, Error)]
pub enum SendMessageError {
    /// Message content is empty or whitespace only.
    #[error("Validation error: message cannot be empty")]
    EmptyMessage,

    /// Conversation does not exist or belongs to another customer.
    #[error("Conversation not found: {0}")]
    ConversationNotFound(ConversationId),

    /// The chosen responder could not read the customer's records.
    #[error("Routing failed: {0}")]
    Routing(#[from] RouteError),

    /// Persistence failure.
    #[error("Repository error: {0}")]
    Repository(#[from] DomainError),
}

/// Result of sending a message.
#[derive(Debug, Clone, PartialEq)]
pub struct SendMessageResult {
    pub reply: String,
    pub intent: Intent,
    pub conversation_id: ConversationId,
}

/// Handler for SendMessage commands.
pub struct SendMessageHandler {
    conversations: Arc<dyn ConversationRepository>,
    router: Arc<IntentRouter>,
}

impl SendMessageHandler {
    pub fn new(conversations: Arc<dyn ConversationRepository>, router: Arc<IntentRouter>) -> Self {
        Self {
            conversations,
            router,
        }
    }

    pub async fn handle(&self, cmd: SendMessageCommand) -> Result<SendMessageResult, SendMessageError> {
        if cmd.message.trim().is_empty() {
            return Err(SendMessageError::EmptyMessage);
        }

        let existing = self.existing_conversation(&cmd).await?;

        // History is everything stored before this message.
        let history: Vec<ConversationTurn> = match &existing {
            Some(conversation) => self
                .conversations
                .messages(&conversation.id)
                .await?
                .iter()
                .map(|m| m.to_turn())
                .collect(),
            None => Vec::new(),
        };

        // Persist nothing until routing succeeds.
        let routed = self
            .router
            .route(&cmd.message, &history, &cmd.user_id)
            .await?;

        let conversation = match existing {
            Some(conversation) => conversation,
            None => {
                let title = conversation_title(&cmd.message);
                let conversation = self.conversations.create(&cmd.user_id, &title).await?;
                tracing::debug!(conversation_id = %conversation.id, "conversation created");
                conversation
            }
        };

        self.conversations
            .append_message(&conversation.id, NewMessage::user(&cmd.message))
            .await?;
        self.conversations
            .append_message(
                &conversation.id,
                NewMessage::assistant(&routed.reply, routed.intent),
            )
            .await?;

        tracing::info!(
            conversation_id = %conversation.id,
            user_id = %cmd.user_id,
            intent = %routed.intent,
            history_len = history.len(),
            "reply stored"
        );

        Ok(SendMessageResult {
            reply: routed.reply,
            intent: routed.intent,
            conversation_id: conversation.id,
        })
    }

    async fn existing_conversation(
        &self,
        cmd: &SendMessageCommand,
    ) -> Result<Option<ConversationRecord>, SendMessageError> {
        let Some(id) = cmd.conversation_id else {
            return Ok(None);
        };
        match self.conversations.find_by_id(&id).await? {
            Some(conversation) if conversation.user_id == cmd.user_id => Ok(Some(conversation)),
            _ => Err(SendMessageError::ConversationNotFound(id)),
        }
    }
}

/// Title for a new conversation: the opening message cut to
/// [`TITLE_MAX_CHARS`] characters.
pub fn conversation_title(message: &str) -> String {
    message.chars().take(TITLE_MAX_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::adapters::memory::{InMemoryAccountStore, InMemoryConversationRepository};
    use crate::application::routing::{
        BillingResponder, ClassificationStrategy, CompletionStrategy, IntentClassifier,
        OrderResponder, ResponderSet, ResponderSettings, SupportResponder,
    };
    use crate::domain::account::OrderSummary;
    use crate::domain::foundation::Timestamp;
    use crate::domain::routing::{TurnRole, FALLBACK_INTENT_REPLY};
    use std::time::Duration;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn router_with(
        classifier: MockAIProvider,
        responder: MockAIProvider,
        store: InMemoryAccountStore,
    ) -> Arc<IntentRouter> {
        let store = Arc::new(store);
        let responder = Arc::new(responder);
        let settings = ResponderSettings::new(Duration::from_millis(200));
        let strategies: Vec<Box<dyn ClassificationStrategy>> = vec![Box::new(
            CompletionStrategy::new("primary", Arc::new(classifier), Duration::from_millis(200)),
        )];
        Arc::new(IntentRouter::new(
            IntentClassifier::new(strategies),
            ResponderSet::new(
                Arc::new(SupportResponder::new(responder.clone(), settings)),
                Arc::new(OrderResponder::new(store.clone(), responder.clone(), settings)),
                Arc::new(BillingResponder::new(store, responder, settings)),
            ),
        ))
    }

    fn keyword_router() -> Arc<IntentRouter> {
        let settings = ResponderSettings::new(Duration::from_millis(200));
        let responder = Arc::new(MockAIProvider::new().with_default_response("On it."));
        let store = Arc::new(InMemoryAccountStore::new());
        Arc::new(IntentRouter::new(
            IntentClassifier::keywords_only(),
            ResponderSet::new(
                Arc::new(SupportResponder::new(responder.clone(), settings)),
                Arc::new(OrderResponder::new(store.clone(), responder.clone(), settings)),
                Arc::new(BillingResponder::new(store, responder, settings)),
            ),
        ))
    }

    #[test]
    fn title_takes_first_fifty_characters() {
        let long = "é".repeat(80);
        assert_eq!(conversation_title(&long).chars().count(), 50);
        assert_eq!(conversation_title("short"), "short");
    }

    #[tokio::test]
    async fn rejects_blank_message() {
        let repo = Arc::new(InMemoryConversationRepository::new());
        let handler = SendMessageHandler::new(repo.clone(), keyword_router());

        let result = handler
            .handle(SendMessageCommand::new(user("user-1"), "   "))
            .await;

        assert!(matches!(result, Err(SendMessageError::EmptyMessage)));
        assert_eq!(repo.conversation_count().await, 0);
    }

    #[tokio::test]
    async fn new_conversation_stores_both_sides() {
        let order = OrderSummary {
            tracking_number: "TRACK123".to_string(),
            status: "shipped".to_string(),
            items: "Desk Lamp".to_string(),
            total: 42.0,
            created_at: Timestamp::now(),
        };
        let customer = user("user-1");
        let store = InMemoryAccountStore::new().with_order(&customer, order);
        let router = router_with(
            MockAIProvider::new().with_response("order"),
            MockAIProvider::new().with_response("Your order TRACK123 has shipped."),
            store,
        );
        let repo = Arc::new(InMemoryConversationRepository::new());
        let handler = SendMessageHandler::new(repo.clone(), router);

        let result = handler
            .handle(SendMessageCommand::new(customer.clone(), "Where is my stuff?"))
            .await
            .unwrap();

        assert_eq!(result.intent, Intent::Order);
        assert_eq!(result.reply, "Your order TRACK123 has shipped.");

        let conversation = repo.find_by_id(&result.conversation_id).await.unwrap().unwrap();
        assert_eq!(conversation.title, "Where is my stuff?");
        assert_eq!(conversation.user_id, customer);

        let messages = repo.messages(&result.conversation_id).await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, TurnRole::User);
        assert_eq!(messages[0].intent, None);
        assert_eq!(messages[1].role, TurnRole::Assistant);
        assert_eq!(messages[1].intent, Some(Intent::Order));
    }

    #[tokio::test]
    async fn continuing_passes_prior_messages_as_history() {
        let classifier = MockAIProvider::new()
            .with_response("support")
            .with_response("support");
        let responder = MockAIProvider::new()
            .with_response("Try resetting it.")
            .with_response("Glad that worked.");
        let router = router_with(classifier.clone(), responder, InMemoryAccountStore::new());
        let repo = Arc::new(InMemoryConversationRepository::new());
        let handler = SendMessageHandler::new(repo.clone(), router);
        let customer = user("user-1");

        let first = handler
            .handle(SendMessageCommand::new(customer.clone(), "My login fails"))
            .await
            .unwrap();
        let second = handler
            .handle(
                SendMessageCommand::new(customer, "That fixed it")
                    .in_conversation(first.conversation_id),
            )
            .await
            .unwrap();

        assert_eq!(second.conversation_id, first.conversation_id);
        assert_eq!(repo.messages(&first.conversation_id).await.unwrap().len(), 4);

        let prompt = classifier.last_prompt().unwrap();
        assert!(prompt.contains(
            "Recent conversation:\nuser: My login fails\nassistant: Try resetting it.\n\n\
             Current message:\nuser: That fixed it"
        ));
    }

    #[tokio::test]
    async fn unknown_conversation_is_not_found() {
        let repo = Arc::new(InMemoryConversationRepository::new());
        let handler = SendMessageHandler::new(repo, keyword_router());
        let missing = ConversationId::new();

        let result = handler
            .handle(SendMessageCommand::new(user("user-1"), "hello").in_conversation(missing))
            .await;

        assert!(matches!(result, Err(SendMessageError::ConversationNotFound(id)) if id == missing));
    }

    #[tokio::test]
    async fn foreign_conversation_is_not_found() {
        let repo = Arc::new(InMemoryConversationRepository::new());
        let owner = user("owner");
        let conversation = repo.create(&owner, "mine").await.unwrap();
        let handler = SendMessageHandler::new(repo.clone(), keyword_router());

        let result = handler
            .handle(
                SendMessageCommand::new(user("intruder"), "hello")
                    .in_conversation(conversation.id),
            )
            .await;

        assert!(matches!(result, Err(SendMessageError::ConversationNotFound(_))));
        assert!(repo.messages(&conversation.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn fallback_reply_is_stored_with_fallback_intent() {
        let repo = Arc::new(InMemoryConversationRepository::new());
        let handler = SendMessageHandler::new(repo.clone(), keyword_router());

        let result = handler
            .handle(SendMessageCommand::new(user("user-1"), "hello there"))
            .await
            .unwrap();

        assert_eq!(result.intent, Intent::Fallback);
        assert_eq!(result.reply, FALLBACK_INTENT_REPLY);
        let messages = repo.messages(&result.conversation_id).await.unwrap();
        assert_eq!(messages[1].intent, Some(Intent::Fallback));
    }

    #[tokio::test]
    async fn record_store_failure_surfaces_as_routing_error() {
        let router = router_with(
            MockAIProvider::new().with_response("billing"),
            MockAIProvider::new(),
            InMemoryAccountStore::new().failing("connection refused"),
        );
        let repo = Arc::new(InMemoryConversationRepository::new());
        let handler = SendMessageHandler::new(repo.clone(), router);

        let result = handler
            .handle(SendMessageCommand::new(user("user-1"), "What do I owe?"))
            .await;

        assert!(matches!(result, Err(SendMessageError::Routing(_))));
        assert_eq!(repo.conversation_count().await, 0);
    }

    #[tokio::test]
    async fn failed_route_leaves_existing_transcript_untouched() {
        let customer = user("user-1");
        let repo = Arc::new(InMemoryConversationRepository::new());
        let first = SendMessageHandler::new(repo.clone(), keyword_router())
            .handle(SendMessageCommand::new(customer.clone(), "hello there"))
            .await
            .unwrap();
        assert_eq!(repo.messages(&first.conversation_id).await.unwrap().len(), 2);

        let failing = router_with(
            MockAIProvider::new().with_response("billing"),
            MockAIProvider::new(),
            InMemoryAccountStore::new().failing("connection refused"),
        );
        let result = SendMessageHandler::new(repo.clone(), failing)
            .handle(
                SendMessageCommand::new(customer, "What do I owe?")
                    .in_conversation(first.conversation_id),
            )
            .await;

        assert!(matches!(result, Err(SendMessageError::Routing(_))));
        let messages = repo.messages(&first.conversation_id).await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].role, TurnRole::Assistant);
    }
}
