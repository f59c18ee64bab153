//! Lightweight references embedded in other payloads

use serde::{Deserialize, Serialize};

/// `{ id, name }` projection the back office embeds for branches and users
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: String,
    pub name: String,
}
