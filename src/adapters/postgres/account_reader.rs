//! PostgreSQL implementation of AccountReader.
//!
//! Reads the most recent orders and invoices of a customer.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::account::{BillingStatus, BillingSummary, OrderSummary, RECENT_RECORD_LIMIT};
use crate::domain::foundation::{Timestamp, UserId};
use crate::ports::{AccountReader, DataAccessError};

/// PostgreSQL implementation of AccountReader.
#[derive(Clone)]
pub struct PostgresAccountReader {
    pool: PgPool,
}

impl PostgresAccountReader {
    /// Creates a new PostgresAccountReader.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountReader for PostgresAccountReader {
    async fn recent_orders(&self, user_id: &UserId) -> Result<Vec<OrderSummary>, DataAccessError> {
        let rows = sqlx::query(
            r#"
            SELECT tracking_number, status, items, total, created_at
            FROM orders
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id.as_str())
        .bind(RECENT_RECORD_LIMIT as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DataAccessError::database(format!("Failed to fetch orders: {}", e)))?;

        rows.into_iter().map(row_to_order).collect()
    }

    async fn recent_billing(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<BillingSummary>, DataAccessError> {
        let rows = sqlx::query(
            r#"
            SELECT invoice_number, amount, status, due_date, created_at
            FROM billing
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id.as_str())
        .bind(RECENT_RECORD_LIMIT as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DataAccessError::database(format!("Failed to fetch billing records: {}", e)))?;

        rows.into_iter().map(row_to_billing).collect()
    }
}

fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DataAccessError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name)
        .map_err(|e| DataAccessError::corrupt(format!("Failed to get {}: {}", name, e)))
}

fn row_to_order(row: PgRow) -> Result<OrderSummary, DataAccessError> {
    let created_at: chrono::DateTime<chrono::Utc> = column(&row, "created_at")?;

    Ok(OrderSummary {
        tracking_number: column(&row, "tracking_number")?,
        status: column(&row, "status")?,
        items: column(&row, "items")?,
        total: column(&row, "total")?,
        created_at: Timestamp::from_datetime(created_at),
    })
}

fn row_to_billing(row: PgRow) -> Result<BillingSummary, DataAccessError> {
    let status: String = column(&row, "status")?;
    let due_date: chrono::DateTime<chrono::Utc> = column(&row, "due_date")?;
    let created_at: chrono::DateTime<chrono::Utc> = column(&row, "created_at")?;

    Ok(BillingSummary {
        invoice_number: column(&row, "invoice_number")?,
        amount: column(&row, "amount")?,
        status: BillingStatus::normalize(&status),
        due_date: Timestamp::from_datetime(due_date),
        created_at: Timestamp::from_datetime(created_at),
    })
}
