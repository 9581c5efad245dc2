//! PostgreSQL implementation of UserDirectory.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::account::UserProfile;
use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::ports::UserDirectory;

/// PostgreSQL implementation of UserDirectory.
#[derive(Clone)]
pub struct PostgresUserDirectory {
    pool: PgPool,
}

impl PostgresUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for PostgresUserDirectory {
    async fn list_users(&self) -> Result<Vec<UserProfile>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, email, avatar_color, created_at
            FROM users
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list users: {}", e)))?;

        rows.iter().map(row_to_user).collect()
    }

    async fn find_user(&self, id: &UserId) -> Result<Option<UserProfile>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, avatar_color, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch user: {}", e)))?;

        row.as_ref().map(row_to_user).transpose()
    }
}

fn row_to_user(row: &PgRow) -> Result<UserProfile, DomainError> {
    let get_err = |field: &str, e: sqlx::Error| {
        DomainError::database(format!("Failed to get {}: {}", field, e))
    };

    let id: String = row.try_get("id").map_err(|e| get_err("id", e))?;
    let created_at: chrono::DateTime<chrono::Utc> =
        row.try_get("created_at").map_err(|e| get_err("created_at", e))?;

    Ok(UserProfile {
        id: UserId::new(id)?,
        name: row.try_get("name").map_err(|e| get_err("name", e))?,
        email: row.try_get("email").map_err(|e| get_err("email", e))?,
        avatar_color: row
            .try_get("avatar_color")
            .map_err(|e| get_err("avatar_color", e))?,
        created_at: Timestamp::from_datetime(created_at),
    })
}
