//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::NotFound
            | Self::ClientNotFound
            | Self::InvoiceNotFound
            | Self::CreditNoteNotFound
            | Self::QuoteNotFound
            | Self::ProductNotFound => StatusCode::NOT_FOUND,

            Self::AlreadyExists | Self::InvoiceAlreadyCancelled => StatusCode::CONFLICT,

            Self::NotAuthenticated | Self::TokenInvalid => StatusCode::UNAUTHORIZED,

            Self::PermissionDenied => StatusCode::FORBIDDEN,

            Self::InvoiceHasPayments
            | Self::CashRegisterClosed
            | Self::ProductOutOfStock
            | Self::PaymentInsufficientAmount
            | Self::DocumentStatusInvalid
            | Self::CreditNoteExceedsInvoice
            | Self::NcfNotAvailable => StatusCode::UNPROCESSABLE_ENTITY,

            Self::ValidationFailed
            | Self::InvalidFormat
            | Self::ValueOutOfRange
            | Self::CartEmpty
            | Self::VoidReasonRequired
            | Self::CreditNoteReasonRequired
            | Self::CreditNoteItemsRequired
            | Self::PaymentInvalidMethod
            | Self::RecipientPhoneMissing
            | Self::RecipientPhoneInvalid => StatusCode::BAD_REQUEST,

            Self::NetworkError | Self::MessageDeliveryFailed => StatusCode::BAD_GATEWAY,
            Self::TimeoutError => StatusCode::GATEWAY_TIMEOUT,
            Self::PrinterNotAvailable => StatusCode::SERVICE_UNAVAILABLE,

            Self::Unknown | Self::InternalError | Self::ConfigError | Self::PrintFailed => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Best-effort code for a bare HTTP status when the body carries none
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::BAD_REQUEST => Self::ValidationFailed,
            StatusCode::UNAUTHORIZED => Self::NotAuthenticated,
            StatusCode::FORBIDDEN => Self::PermissionDenied,
            StatusCode::NOT_FOUND => Self::NotFound,
            StatusCode::CONFLICT => Self::AlreadyExists,
            StatusCode::GATEWAY_TIMEOUT | StatusCode::REQUEST_TIMEOUT => Self::TimeoutError,
            s if s.is_server_error() => Self::InternalError,
            _ => Self::Unknown,
        }
    }
}
