//! In-memory account store.
//!
//! Holds customers with their orders and invoices. Serves both the
//! `AccountReader` and `UserDirectory` ports. Useful for tests and local
//! runs without a database.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::domain::account::{BillingSummary, OrderSummary, UserProfile, RECENT_RECORD_LIMIT};
use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::ports::{AccountReader, DataAccessError, UserDirectory};

/// Fixture-style store; records are added with the `with_*` builders.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAccountStore {
    users: Vec<UserProfile>,
    orders: HashMap<UserId, Vec<OrderSummary>>,
    invoices: HashMap<UserId, Vec<BillingSummary>>,
    failure: Option<String>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, user: UserProfile) -> Self {
        self.users.push(user);
        self
    }

    pub fn with_order(mut self, user_id: &UserId, order: OrderSummary) -> Self {
        self.orders.entry(user_id.clone()).or_default().push(order);
        self
    }

    pub fn with_invoice(mut self, user_id: &UserId, invoice: BillingSummary) -> Self {
        self.invoices
            .entry(user_id.clone())
            .or_default()
            .push(invoice);
        self
    }

    /// Makes every read fail with a database error.
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    fn check_available(&self) -> Result<(), DataAccessError> {
        match &self.failure {
            Some(message) => Err(DataAccessError::database(message.clone())),
            None => Ok(()),
        }
    }
}

/// Newest first, bounded.
fn most_recent<T: Clone>(
    records: Option<&Vec<T>>,
    created_at: impl Fn(&T) -> Timestamp,
) -> Vec<T> {
    let mut records = records.cloned().unwrap_or_default();
    records.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
    records.truncate(RECENT_RECORD_LIMIT);
    records
}

#[async_trait]
impl AccountReader for InMemoryAccountStore {
    async fn recent_orders(&self, user_id: &UserId) -> Result<Vec<OrderSummary>, DataAccessError> {
        self.check_available()?;
        Ok(most_recent(self.orders.get(user_id), |o| o.created_at))
    }

    async fn recent_billing(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<BillingSummary>, DataAccessError> {
        self.check_available()?;
        Ok(most_recent(self.invoices.get(user_id), |b| b.created_at))
    }
}

#[async_trait]
impl UserDirectory for InMemoryAccountStore {
    async fn list_users(&self) -> Result<Vec<UserProfile>, DomainError> {
        if let Some(message) = &self.failure {
            return Err(DomainError::database(message.clone()));
        }
        let mut users = self.users.clone();
        users.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(users)
    }

    async fn find_user(&self, id: &UserId) -> Result<Option<UserProfile>, DomainError> {
        if let Some(message) = &self.failure {
            return Err(DomainError::database(message.clone()));
        }
        Ok(self.users.iter().find(|user| &user.id == id).cloned())
    }
}
