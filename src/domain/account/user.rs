//! Customer profile as exposed by the user directory.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, UserId};

/// A customer account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub email: String,
    /// Avatar accent color used by the chat UI (e.g. "#8b5cf6").
    pub avatar_color: Option<String>,
    pub created_at: Timestamp,
}
