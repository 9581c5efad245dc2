//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `account` - Customers and their order/billing records
//! - `routing` - Intents, context windows, snapshots and canned replies

pub mod account;
pub mod foundation;
pub mod routing;
