//! PostgreSQL implementation of ConversationRepository.
//!
//! Conversations and messages live in two tables; deleting a conversation
//! cascades to its messages.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{
    ConversationId, DomainError, ErrorCode, MessageId, Timestamp, UserId,
};
use crate::domain::routing::{Intent, TurnRole};
use crate::ports::{
    ConversationRecord, ConversationRepository, ConversationSummary, NewMessage, StoredMessage,
};

/// PostgreSQL implementation of ConversationRepository.
#[derive(Clone)]
pub struct PostgresConversationRepository {
    pool: PgPool,
}

impl PostgresConversationRepository {
    /// Creates a new PostgresConversationRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConversationRepository for PostgresConversationRepository {
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

        sqlx::query(
            r#"
            INSERT INTO conversations (id, user_id, title, created_at, last_message_at)
            VALUES ($1, $2, $3, $4, NULL)
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(record.user_id.as_str())
        .bind(&record.title)
        .bind(record.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to insert conversation: {}", e)))?;

        Ok(record)
    }

    async fn find_by_id(
        &self,
        id: &ConversationId,
    ) -> Result<Option<ConversationRecord>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, title, created_at, last_message_at
            FROM conversations
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch conversation: {}", e)))?;

        row.map(|row| row_to_conversation(&row)).transpose()
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<ConversationSummary>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT c.id, c.user_id, c.title, c.created_at, c.last_message_at,
                   m.id AS message_id, m.role, m.content, m.agent_type,
                   m.created_at AS message_created_at
            FROM conversations c
            LEFT JOIN LATERAL (
                SELECT id, role, content, agent_type, created_at
                FROM messages
                WHERE conversation_id = c.id
                ORDER BY created_at DESC
                LIMIT 1
            ) m ON TRUE
            WHERE c.user_id = $1
            ORDER BY c.created_at DESC
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list conversations: {}", e)))?;

        rows.iter()
            .map(|row| -> Result<ConversationSummary, DomainError> {
                let conversation = row_to_conversation(row)?;
                let message_id: Option<uuid::Uuid> = column(row, "message_id")?;
                let last_message = match message_id {
                    Some(message_id) => Some(StoredMessage {
                        id: MessageId::from_uuid(message_id),
                        conversation_id: conversation.id,
                        role: str_to_role(&column::<String>(row, "role")?)?,
                        content: column(row, "content")?,
                        intent: str_to_intent(column(row, "agent_type")?)?,
                        created_at: Timestamp::from_datetime(column(row, "message_created_at")?),
                    }),
                    None => None,
                };
                Ok(ConversationSummary {
                    conversation,
                    last_message,
                })
            })
            .collect()
    }

    async fn messages(&self, id: &ConversationId) -> Result<Vec<StoredMessage>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, conversation_id, role, content, agent_type, created_at
            FROM messages
            WHERE conversation_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch messages: {}", e)))?;

        rows.iter().map(row_to_message).collect()
    }

    async fn append_message(
        &self,
        id: &ConversationId,
        message: NewMessage,
    ) -> Result<StoredMessage, DomainError> {
        let stored = StoredMessage {
            id: MessageId::new(),
            conversation_id: *id,
            role: message.role,
            content: message.content,
            intent: message.intent,
            created_at: Timestamp::now(),
        };

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database(format!("Failed to start transaction: {}", e)))?;

        let updated = sqlx::query(
            r#"
            UPDATE conversations SET last_message_at = $2 WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(stored.created_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database(format!("Failed to update conversation: {}", e)))?;

        if updated.rows_affected() == 0 {
            return Err(
                DomainError::new(ErrorCode::ConversationNotFound, "Conversation not found")
                    .with_detail("conversation_id", id.to_string()),
            );
        }

        sqlx::query(
            r#"
            INSERT INTO messages (id, conversation_id, role, content, agent_type, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(stored.id.as_uuid())
        .bind(id.as_uuid())
        .bind(stored.role.as_str())
        .bind(&stored.content)
        .bind(stored.intent.map(|intent| intent.as_str()))
        .bind(stored.created_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database(format!("Failed to insert message: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::database(format!("Failed to commit transaction: {}", e)))?;

        Ok(stored)
    }

    async fn delete(&self, id: &ConversationId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM conversations WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to delete conversation: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Row mapping
// ════════════════════════════════════════════════════════════════════════════

fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name)
        .map_err(|e| DomainError::database(format!("Failed to get {}: {}", name, e)))
}

fn row_to_conversation(row: &PgRow) -> Result<ConversationRecord, DomainError> {
    let id: uuid::Uuid = column(row, "id")?;
    let user_id: String = column(row, "user_id")?;
    let created_at: chrono::DateTime<chrono::Utc> = column(row, "created_at")?;
    let last_message_at: Option<chrono::DateTime<chrono::Utc>> = column(row, "last_message_at")?;

    Ok(ConversationRecord {
        id: ConversationId::from_uuid(id),
        user_id: UserId::new(user_id)?,
        title: column(row, "title")?,
        created_at: Timestamp::from_datetime(created_at),
        last_message_at: last_message_at.map(Timestamp::from_datetime),
    })
}

fn row_to_message(row: &PgRow) -> Result<StoredMessage, DomainError> {
    let id: uuid::Uuid = column(row, "id")?;
    let conversation_id: uuid::Uuid = column(row, "conversation_id")?;
    let role: String = column(row, "role")?;
    let created_at: chrono::DateTime<chrono::Utc> = column(row, "created_at")?;

    Ok(StoredMessage {
        id: MessageId::from_uuid(id),
        conversation_id: ConversationId::from_uuid(conversation_id),
        role: str_to_role(&role)?,
        content: column(row, "content")?,
        intent: str_to_intent(column(row, "agent_type")?)?,
        created_at: Timestamp::from_datetime(created_at),
    })
}

fn str_to_role(s: &str) -> Result<TurnRole, DomainError> {
    match s {
        "user" => Ok(TurnRole::User),
        "assistant" => Ok(TurnRole::Assistant),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid message role: {}", s),
        )),
    }
}

fn str_to_intent(s: Option<String>) -> Result<Option<Intent>, DomainError> {
    s.map(|raw| {
        raw.parse::<Intent>().map_err(|_| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid agent type: {}", raw),
            )
        })
    })
    .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_map_from_storage_strings() {
        assert_eq!(str_to_role("user").unwrap(), TurnRole::User);
        assert_eq!(str_to_role("assistant").unwrap(), TurnRole::Assistant);
        assert!(str_to_role("system").is_err());
    }

    #[test]
    fn agent_type_is_optional() {
        assert_eq!(str_to_intent(None).unwrap(), None);
        assert_eq!(
            str_to_intent(Some("billing".to_string())).unwrap(),
            Some(Intent::Billing)
        );
        assert!(str_to_intent(Some("sales".to_string())).is_err());
    }
}
