//! User roles and the acting user

use serde::{Deserialize, Serialize};

/// Back-office user role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Administrator,
    Supervisor,
    Operator,
    Cashier,
}

impl UserRole {
    /// Whether the role may override a cart line's unit price
    pub fn can_edit_prices(&self) -> bool {
        matches!(self, Self::Administrator | Self::Supervisor)
    }
}

/// User performing an action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: String,
    pub name: String,
    pub role: UserRole,
}

impl Actor {
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: UserRole) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role,
        }
    }

    pub fn can_edit_prices(&self) -> bool {
        self.role.can_edit_prices()
    }
}
