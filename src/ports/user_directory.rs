//! User directory port - lookup of customer accounts.

use async_trait::async_trait;

use crate::domain::account::UserProfile;
use crate::domain::foundation::{DomainError, UserId};

/// Read port for customer accounts.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// All customers, ordered by name.
    async fn list_users(&self) -> Result<Vec<UserProfile>, DomainError>;

    /// A single customer, `None` if unknown.
    async fn find_user(&self, id: &UserId) -> Result<Option<UserProfile>, DomainError>;
}
