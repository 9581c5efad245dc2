//! Account reader port - read-only access to a customer's records.
//!
//! Responders ground their replies on the most recent orders and invoices
//! of the customer they are talking to. This port is the only way the
//! routing core touches the record store.
//!
//! # Contract
//!
//! - Results are ordered most-recent first (by creation time)
//! - At most [`RECENT_RECORD_LIMIT`] rows are returned
//! - A customer without records yields an empty vec, never an error

use async_trait::async_trait;

use crate::domain::account::{BillingSummary, OrderSummary};
use crate::domain::foundation::UserId;

pub use crate::domain::account::RECENT_RECORD_LIMIT;

/// Read port for the order and billing records of a customer.
#[async_trait]
pub trait AccountReader: Send + Sync {
    /// The customer's most recent orders, newest first.
    async fn recent_orders(&self, user_id: &UserId) -> Result<Vec<OrderSummary>, DataAccessError>;

    /// The customer's most recent invoices, newest first.
    async fn recent_billing(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<BillingSummary>, DataAccessError>;
}

/// Failure reading from the record store.
///
/// Unlike completion failures this is not absorbed by the routing core: a
/// responder cannot ground its reply without a snapshot.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DataAccessError {
    /// Query failed at the database layer.
    #[error("database error: {0}")]
    Database(String),

    /// A stored row could not be mapped onto a domain type.
    #[error("corrupt record: {0}")]
    CorruptRecord(String),
}

impl DataAccessError {
    /// Creates a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database(message.into())
    }

    /// Creates a corrupt record error.
    pub fn corrupt(message: impl Into<String>) -> Self {
        Self::CorruptRecord(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_access_error_displays_correctly() {
        assert_eq!(
            DataAccessError::database("connection refused").to_string(),
            "database error: connection refused"
        );
        assert_eq!(
            DataAccessError::corrupt("negative total").to_string(),
            "corrupt record: negative total"
        );
    }
}
