//! Error types of the routing services.
//!
//! Only [`RouteError`] ever leaves the router; the other two are absorbed
//! where they occur.

use crate::ports::{AIError, DataAccessError};

/// Why a classification strategy declined to answer.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ClassificationError {
    #[error("completion backend failed: {0}")]
    Backend(#[from] AIError),

    #[error("completion was empty")]
    Empty,

    #[error("unrecognized intent label '{0}'")]
    Unrecognized(String),
}

/// Why a responder could not produce a generated reply.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ResponderError {
    #[error("completion backend failed: {0}")]
    Backend(#[from] AIError),

    #[error("completion was empty")]
    EmptyCompletion,
}

/// Failure routing a message. Fatal for that request only.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RouteError {
    #[error("failed to load account records: {0}")]
    DataAccess(#[from] DataAccessError),
}
