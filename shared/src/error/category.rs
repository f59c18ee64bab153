//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Authentication errors (1xxx)
    Auth,
    /// Permission errors (2xxx)
    Permission,
    /// Customer errors (3xxx)
    Client,
    /// Sales document errors (4xxx)
    Sales,
    /// Payment errors (5xxx)
    Payment,
    /// Product errors (6xxx)
    Product,
    /// Cash register errors (7xxx)
    CashRegister,
    /// Messaging errors (8xxx)
    Messaging,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            2000..3000 => Self::Permission,
            3000..4000 => Self::Client,
            4000..5000 => Self::Sales,
            5000..6000 => Self::Payment,
            6000..7000 => Self::Product,
            7000..8000 => Self::CashRegister,
            8000..9000 => Self::Messaging,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Auth => "auth",
            Self::Permission => "permission",
            Self::Client => "client",
            Self::Sales => "sales",
            Self::Payment => "payment",
            Self::Product => "product",
            Self::CashRegister => "cash_register",
            Self::Messaging => "messaging",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(999), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1001), ErrorCategory::Auth);
        assert_eq!(ErrorCategory::from_code(2001), ErrorCategory::Permission);
        assert_eq!(ErrorCategory::from_code(3001), ErrorCategory::Client);
        assert_eq!(ErrorCategory::from_code(4001), ErrorCategory::Sales);
        assert_eq!(ErrorCategory::from_code(5001), ErrorCategory::Payment);
        assert_eq!(ErrorCategory::from_code(6001), ErrorCategory::Product);
        assert_eq!(ErrorCategory::from_code(7001), ErrorCategory::CashRegister);
        assert_eq!(ErrorCategory::from_code(8001), ErrorCategory::Messaging);
        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(10000), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::CartEmpty.category(), ErrorCategory::Sales);
        assert_eq!(
            ErrorCode::CashRegisterClosed.category(),
            ErrorCategory::CashRegister
        );
        assert_eq!(
            ErrorCode::PaymentInsufficientAmount.category(),
            ErrorCategory::Payment
        );
        assert_eq!(ErrorCode::NetworkError.category(), ErrorCategory::System);
    }

    #[test]
    fn test_category_serialize() {
        let json = serde_json::to_string(&ErrorCategory::CashRegister).unwrap();
        assert_eq!(json, "\"cash_register\"");
    }
}
