//! Domain snapshots and the replies computed from them without a model.

use crate::domain::account::{BillingSummary, OrderSummary, RECENT_RECORD_LIMIT};

/// Reply for messages that matched no intent at all.
pub const FALLBACK_INTENT_REPLY: &str = "I'm here to help! You can ask me about your orders, billing, or general product questions. What would you like to know?";

/// Support reply when the completion backend cannot answer.
pub const SUPPORT_FALLBACK_REPLY: &str =
    "I'd be happy to help! For account issues, please visit the 'Account Settings' page.";

/// Order reply when generation failed and the customer has no orders.
pub const ORDER_APOLOGY_REPLY: &str =
    "I apologize, but I encountered an error checking your orders. Please try again.";

/// Billing reply when generation failed and nothing is outstanding.
pub const GOOD_STANDING_REPLY: &str =
    "Your account is in good standing with no outstanding balance.";

/// Records a responder grounds its reply on, fetched fresh per request.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainSnapshot {
    /// The support responder reads nothing.
    None,
    /// Most recent orders, newest first.
    Orders(Vec<OrderSummary>),
    /// Most recent invoices, newest first.
    Billing(Vec<BillingSummary>),
}

impl DomainSnapshot {
    /// Order snapshot, truncated to the snapshot bound.
    pub fn orders(mut orders: Vec<OrderSummary>) -> Self {
        orders.truncate(RECENT_RECORD_LIMIT);
        DomainSnapshot::Orders(orders)
    }

    /// Billing snapshot, truncated to the snapshot bound.
    pub fn billing(mut records: Vec<BillingSummary>) -> Self {
        records.truncate(RECENT_RECORD_LIMIT);
        DomainSnapshot::Billing(records)
    }

    /// Pretty-printed JSON of the records, as embedded in a prompt.
    ///
    /// `None` renders as an empty string.
    pub fn to_prompt_json(&self) -> String {
        let rendered = match self {
            DomainSnapshot::None => return String::new(),
            DomainSnapshot::Orders(orders) => serde_json::to_string_pretty(orders),
            DomainSnapshot::Billing(records) => serde_json::to_string_pretty(records),
        };
        rendered.unwrap_or_else(|_| "[]".to_string())
    }

    /// The reply given when generation fails, derived only from the records.
    pub fn deterministic_reply(&self) -> String {
        match self {
            DomainSnapshot::None => SUPPORT_FALLBACK_REPLY.to_string(),
            DomainSnapshot::Orders(orders) => order_reply(orders),
            DomainSnapshot::Billing(records) => billing_reply(records),
        }
    }
}

fn order_reply(orders: &[OrderSummary]) -> String {
    match orders.first() {
        Some(latest) => format!(
            "Your most recent order ({}) is currently {}.",
            latest.tracking_number, latest.status
        ),
        None => ORDER_APOLOGY_REPLY.to_string(),
    }
}

fn billing_reply(records: &[BillingSummary]) -> String {
    let (count, total) = outstanding_balance(records);
    if count == 0 {
        return GOOD_STANDING_REPLY.to_string();
    }
    format!(
        "You currently have an outstanding balance of ${:.2} across {} invoice(s).",
        total, count
    )
}

/// Number and summed amount of unpaid or overdue invoices.
pub fn outstanding_balance(records: &[BillingSummary]) -> (usize, f64) {
    records
        .iter()
        .filter(|record| record.is_outstanding())
        .fold((0, 0.0), |(count, total), record| {
            (count + 1, total + record.amount)
        })
}
