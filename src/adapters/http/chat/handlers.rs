//! HTTP handlers for chat endpoints.
//!
//! These handlers connect Axum routes to application layer command/query handlers.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};

use crate::adapters::http::error::ApiError;
use crate::application::handlers::{
    DeleteConversationCommand, DeleteConversationHandler, GetConversationHandler,
    GetConversationQuery, ListConversationsHandler, ListConversationsQuery, SendMessageCommand,
    SendMessageHandler,
};
use crate::application::routing::IntentRouter;
use crate::domain::foundation::{ConversationId, UserId};
use crate::ports::ConversationRepository;

use super::dto::{
    ConversationResponse, ListConversationsParams, SendMessageRequest, SendMessageResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for chat endpoints.
#[derive(Clone)]
pub struct ChatAppState {
    pub conversations: Arc<dyn ConversationRepository>,
    pub router: Arc<IntentRouter>,
}

impl ChatAppState {
    pub fn new(conversations: Arc<dyn ConversationRepository>, router: Arc<IntentRouter>) -> Self {
        Self {
            conversations,
            router,
        }
    }

    pub fn send_message_handler(&self) -> SendMessageHandler {
        SendMessageHandler::new(self.conversations.clone(), self.router.clone())
    }

    pub fn list_conversations_handler(&self) -> ListConversationsHandler {
        ListConversationsHandler::new(self.conversations.clone())
    }

    pub fn get_conversation_handler(&self) -> GetConversationHandler {
        GetConversationHandler::new(self.conversations.clone())
    }

    pub fn delete_conversation_handler(&self) -> DeleteConversationHandler {
        DeleteConversationHandler::new(self.conversations.clone())
    }
}

fn conversation_id(raw: &str) -> Result<ConversationId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::NotFound("Conversation not found".to_string()))
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/chat/messages - Route a customer message and return the reply
pub async fn send_message(
    State(state): State<ChatAppState>,
    Json(request): Json<SendMessageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (Some(message), Some(user_id)) = (request.message, request.user_id) else {
        return Err(ApiError::BadRequest(
            "Message and userId are required".to_string(),
        ));
    };
    let user_id = UserId::new(user_id)
        .map_err(|_| ApiError::BadRequest("Message and userId are required".to_string()))?;

    let mut cmd = SendMessageCommand::new(user_id, message);
    if let Some(raw) = request.conversation_id.as_deref() {
        cmd = cmd.in_conversation(conversation_id(raw)?);
    }

    let result = state.send_message_handler().handle(cmd).await?;
    Ok(Json(SendMessageResponse::from(result)))
}

/// DELETE /api/chat/conversations/:id - Delete a conversation
pub async fn delete_conversation(
    State(state): State<ChatAppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = DeleteConversationCommand {
        conversation_id: conversation_id(&id)?,
    };
    state.delete_conversation_handler().handle(cmd).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/chat/conversations?userId= - List a customer's conversations
pub async fn list_conversations(
    State(state): State<ChatAppState>,
    Query(params): Query<ListConversationsParams>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = params
        .user_id
        .and_then(|raw| UserId::new(raw).ok())
        .ok_or_else(|| ApiError::BadRequest("userId is required".to_string()))?;

    let conversations = state
        .list_conversations_handler()
        .handle(ListConversationsQuery { user_id })
        .await?;

    let response: Vec<ConversationResponse> = conversations
        .into_iter()
        .map(ConversationResponse::from)
        .collect();
    Ok(Json(response))
}

/// GET /api/chat/conversations/:id - Conversation with its full transcript
pub async fn get_conversation(
    State(state): State<ChatAppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let query = GetConversationQuery {
        conversation_id: conversation_id(&id)?,
    };
    let detail = state.get_conversation_handler().handle(query).await?;
    Ok(Json(ConversationResponse::from(detail)))
}
