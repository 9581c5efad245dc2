//! Read-only projections of a customer's orders and invoices.
//!
//! These are the rows a responder grounds its reply on. Field names
//! serialize in camelCase because the JSON form is embedded verbatim
//! into completion prompts.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::Timestamp;

/// Maximum number of records a snapshot carries.
pub const RECENT_RECORD_LIMIT: usize = 5;

/// One order as shown to the order responder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub tracking_number: String,
    /// Carrier/fulfilment status as stored (e.g. "shipped", "delivered").
    pub status: String,
    /// Human-readable item list.
    pub items: String,
    pub total: f64,
    pub created_at: Timestamp,
}

/// One invoice as shown to the billing responder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingSummary {
    pub invoice_number: String,
    pub amount: f64,
    pub status: BillingStatus,
    pub due_date: Timestamp,
    pub created_at: Timestamp,
}

impl BillingSummary {
    /// True when the invoice still has to be paid.
    pub fn is_outstanding(&self) -> bool {
        self.status.is_outstanding()
    }
}

/// Normalized payment status of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingStatus {
    Paid,
    Unpaid,
    Overdue,
    /// Cancelled, voided or refunded; nothing is owed.
    Void,
}

impl BillingStatus {
    /// Maps a raw store value onto the normalized status.
    ///
    /// Matching is case-insensitive. Unrecognized values count as `Unpaid`
    /// so an unknown state is never reported as settled.
    pub fn normalize(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "paid" | "settled" => BillingStatus::Paid,
            "overdue" | "past_due" | "past due" => BillingStatus::Overdue,
            "void" | "voided" | "cancelled" | "canceled" | "refunded" => BillingStatus::Void,
            _ => BillingStatus::Unpaid,
        }
    }

    /// Unpaid and overdue invoices are outstanding.
    pub fn is_outstanding(&self) -> bool {
        matches!(self, BillingStatus::Unpaid | BillingStatus::Overdue)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BillingStatus::Paid => "paid",
            BillingStatus::Unpaid => "unpaid",
            BillingStatus::Overdue => "overdue",
            BillingStatus::Void => "void",
        }
    }
}

impl fmt::Display for BillingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_is_case_insensitive() {
        assert_eq!(BillingStatus::normalize("PAID"), BillingStatus::Paid);
        assert_eq!(BillingStatus::normalize(" Unpaid "), BillingStatus::Unpaid);
        assert_eq!(BillingStatus::normalize("OVERDUE"), BillingStatus::Overdue);
    }

    #[test]
    fn normalize_treats_unknown_as_unpaid() {
        assert_eq!(BillingStatus::normalize("pending"), BillingStatus::Unpaid);
        assert_eq!(BillingStatus::normalize(""), BillingStatus::Unpaid);
    }

    #[test]
    fn only_unpaid_and_overdue_are_outstanding() {
        assert!(BillingStatus::Unpaid.is_outstanding());
        assert!(BillingStatus::Overdue.is_outstanding());
        assert!(!BillingStatus::Paid.is_outstanding());
        assert!(!BillingStatus::Void.is_outstanding());
    }

    #[test]
    fn order_summary_serializes_camel_case() {
        let order = OrderSummary {
            tracking_number: "TRACK10000".to_string(),
            status: "shipped".to_string(),
            items: "Laptop, Mouse".to_string(),
            total: 299.99,
            created_at: Timestamp::now(),
        };

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["trackingNumber"], "TRACK10000");
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn billing_summary_serializes_normalized_status() {
        let invoice = BillingSummary {
            invoice_number: "INV-2024001".to_string(),
            amount: 175.0,
            status: BillingStatus::normalize("UNPAID"),
            due_date: Timestamp::now(),
            created_at: Timestamp::now(),
        };

        let json = serde_json::to_value(&invoice).unwrap();
        assert_eq!(json["status"], "unpaid");
        assert_eq!(json["invoiceNumber"], "INV-2024001");
    }
}
