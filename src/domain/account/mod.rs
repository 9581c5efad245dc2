//! Account module - customers and their order/billing records.

mod records;
mod user;

pub use records::{BillingStatus, BillingSummary, OrderSummary, RECENT_RECORD_LIMIT};
pub use user::UserProfile;
