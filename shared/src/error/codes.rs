//! Unified error codes for the POS workspace
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Customer errors
//! - 4xxx: Sales document errors (cart, invoices, credit notes)
//! - 5xxx: Payment errors
//! - 6xxx: Product errors
//! - 7xxx: Cash register errors
//! - 8xxx: Messaging errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid format
    InvalidFormat = 6,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,

    // ==================== 3xxx: Customer ====================
    /// Customer not found
    ClientNotFound = 3001,

    // ==================== 4xxx: Sales ====================
    /// Invoice not found
    InvoiceNotFound = 4001,
    /// Invoice has already been cancelled
    InvoiceAlreadyCancelled = 4002,
    /// Invoice has registered payments and cannot be voided
    InvoiceHasPayments = 4003,
    /// Cart has no lines
    CartEmpty = 4004,
    /// Credit note not found
    CreditNoteNotFound = 4005,
    /// Void reason is mandatory
    VoidReasonRequired = 4006,
    /// Quote not found
    QuoteNotFound = 4007,
    /// Document status does not allow the operation (e.g. converting a non-open quote)
    DocumentStatusInvalid = 4008,
    /// Credit note reason is mandatory
    CreditNoteReasonRequired = 4009,
    /// Credit note has no items
    CreditNoteItemsRequired = 4010,
    /// Credited quantity exceeds the invoiced quantity
    CreditNoteExceedsInvoice = 4011,
    /// No NCF sequence available
    NcfNotAvailable = 4012,

    // ==================== 5xxx: Payment ====================
    /// Insufficient payment amount
    PaymentInsufficientAmount = 5002,
    /// Invalid payment method
    PaymentInvalidMethod = 5003,

    // ==================== 6xxx: Product ====================
    /// Product not found
    ProductNotFound = 6001,
    /// Product is out of stock
    ProductOutOfStock = 6003,

    // ==================== 7xxx: Cash register ====================
    /// No open cash register
    CashRegisterClosed = 7001,

    // ==================== 8xxx: Messaging ====================
    /// Recipient has no phone number
    RecipientPhoneMissing = 8001,
    /// Recipient phone number is invalid
    RecipientPhoneInvalid = 8002,
    /// Message could not be delivered
    MessageDeliveryFailed = 8003,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Network error
    NetworkError = 9003,
    /// Timeout error
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
    /// Printer not available
    PrinterNotAvailable = 9201,
    /// Print failed
    PrintFailed = 9202,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::TokenInvalid => "Authentication token is invalid",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",

            // Customer
            ErrorCode::ClientNotFound => "Client not found",

            // Sales
            ErrorCode::InvoiceNotFound => "Invoice not found",
            ErrorCode::InvoiceAlreadyCancelled => "Invoice is already cancelled",
            ErrorCode::InvoiceHasPayments => "Invoice has registered payments",
            ErrorCode::CartEmpty => "Cart is empty",
            ErrorCode::CreditNoteNotFound => "Credit note not found",
            ErrorCode::VoidReasonRequired => "A cancellation reason is required",
            ErrorCode::QuoteNotFound => "Quote not found",
            ErrorCode::DocumentStatusInvalid => "Document status does not allow this operation",
            ErrorCode::CreditNoteReasonRequired => "A credit note reason is required",
            ErrorCode::CreditNoteItemsRequired => "A credit note needs at least one item",
            ErrorCode::CreditNoteExceedsInvoice => "Credited quantity exceeds the invoice quantity",
            ErrorCode::NcfNotAvailable => "No fiscal number sequence available",

            // Payment
            ErrorCode::PaymentInsufficientAmount => "Insufficient payment amount",
            ErrorCode::PaymentInvalidMethod => "Invalid payment method",

            // Product
            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::ProductOutOfStock => "Product is out of stock",

            // Cash register
            ErrorCode::CashRegisterClosed => "Cash register must be open for cash sales",

            // Messaging
            ErrorCode::RecipientPhoneMissing => "Recipient has no phone number",
            ErrorCode::RecipientPhoneInvalid => "Recipient phone number is invalid",
            ErrorCode::MessageDeliveryFailed => "Message could not be delivered",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::PrinterNotAvailable => "Printer is not available",
            ErrorCode::PrintFailed => "Print failed",
        }
    }

    /// Map a string code returned by the back office (`{"error":{"code":..}}`)
    pub fn from_remote(code: &str) -> Option<Self> {
        let code = match code {
            "VALIDATION_ERROR" => ErrorCode::ValidationFailed,
            "NOT_FOUND" => ErrorCode::NotFound,
            "UNAUTHORIZED" => ErrorCode::NotAuthenticated,
            "INVALID_TOKEN" => ErrorCode::TokenInvalid,
            "FORBIDDEN" => ErrorCode::PermissionDenied,
            "CLIENT_NOT_FOUND" => ErrorCode::ClientNotFound,
            "ALREADY_CANCELLED" | "INVALID_INVOICE" => ErrorCode::InvoiceAlreadyCancelled,
            "HAS_PAYMENTS" => ErrorCode::InvoiceHasPayments,
            "INVALID_STATUS" => ErrorCode::DocumentStatusInvalid,
            "EXCEEDS_INVOICE_QUANTITY" => ErrorCode::CreditNoteExceedsInvoice,
            "NCF_NOT_AVAILABLE" => ErrorCode::NcfNotAvailable,
            "CASH_NOT_OPEN" | "CASH_CLOSED" => ErrorCode::CashRegisterClosed,
            "INVALID_PAYMENT_METHOD" => ErrorCode::PaymentInvalidMethod,
            "INSUFFICIENT_PAYMENT" => ErrorCode::PaymentInsufficientAmount,
            "PRODUCT_NOT_FOUND" => ErrorCode::ProductNotFound,
            "INSUFFICIENT_STOCK" => ErrorCode::ProductOutOfStock,
            "MISSING_PHONE" => ErrorCode::RecipientPhoneMissing,
            "SEND_FAILED" | "EVOLUTION_API_UNREACHABLE" | "EVOLUTION_API_TIMEOUT" => {
                ErrorCode::MessageDeliveryFailed
            }
            "CONFIG_ERROR" => ErrorCode::ConfigError,
            "INTERNAL_ERROR" => ErrorCode::InternalError,
            _ => return None,
        };
        Some(code)
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when a numeric value does not match any [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            6 => Ok(ErrorCode::InvalidFormat),
            8 => Ok(ErrorCode::ValueOutOfRange),

            1001 => Ok(ErrorCode::NotAuthenticated),
            1004 => Ok(ErrorCode::TokenInvalid),

            2001 => Ok(ErrorCode::PermissionDenied),

            3001 => Ok(ErrorCode::ClientNotFound),

            4001 => Ok(ErrorCode::InvoiceNotFound),
            4002 => Ok(ErrorCode::InvoiceAlreadyCancelled),
            4003 => Ok(ErrorCode::InvoiceHasPayments),
            4004 => Ok(ErrorCode::CartEmpty),
            4005 => Ok(ErrorCode::CreditNoteNotFound),
            4006 => Ok(ErrorCode::VoidReasonRequired),
            4007 => Ok(ErrorCode::QuoteNotFound),
            4008 => Ok(ErrorCode::DocumentStatusInvalid),
            4009 => Ok(ErrorCode::CreditNoteReasonRequired),
            4010 => Ok(ErrorCode::CreditNoteItemsRequired),
            4011 => Ok(ErrorCode::CreditNoteExceedsInvoice),
            4012 => Ok(ErrorCode::NcfNotAvailable),

            5002 => Ok(ErrorCode::PaymentInsufficientAmount),
            5003 => Ok(ErrorCode::PaymentInvalidMethod),

            6001 => Ok(ErrorCode::ProductNotFound),
            6003 => Ok(ErrorCode::ProductOutOfStock),

            7001 => Ok(ErrorCode::CashRegisterClosed),

            8001 => Ok(ErrorCode::RecipientPhoneMissing),
            8002 => Ok(ErrorCode::RecipientPhoneInvalid),
            8003 => Ok(ErrorCode::MessageDeliveryFailed),

            9001 => Ok(ErrorCode::InternalError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),
            9201 => Ok(ErrorCode::PrinterNotAvailable),
            9202 => Ok(ErrorCode::PrintFailed),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
