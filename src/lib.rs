//! Support Desk - Customer Support Chat Backend
//!
//! Routes each customer message to one of three responders (general
//! support, orders, billing) using a cascade of completion-backed
//! classifiers with a keyword safety net, grounding order and billing
//! replies on the customer's own records.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
