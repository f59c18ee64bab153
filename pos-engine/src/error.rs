//! Sales operation errors
//!
//! Every failure is scoped to the single user action that triggered it.
//! Nothing here is fatal to the process.

use pos_client::ClientError;
use pos_printer::PrintError;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SalesError {
    /// Bad user input (empty cart, insufficient cash, missing void reason)
    #[error("{message}")]
    Validation { code: ErrorCode, message: String },

    /// External state forbids the action (cash drawer closed)
    #[error("{message}")]
    Precondition { code: ErrorCode, message: String },

    /// Document id does not exist
    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    /// Network or API failure; re-invoking the operation may succeed
    #[error(transparent)]
    Remote(#[from] ClientError),

    /// Receipt printer unreachable or rejected the job
    #[error(transparent)]
    Device(#[from] PrintError),
}

impl SalesError {
    pub fn validation(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Validation {
            code,
            message: message.into(),
        }
    }

    pub fn precondition(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Precondition {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation { code, .. } | Self::Precondition { code, .. } => *code,
            Self::NotFound { resource, .. } => match *resource {
                "Invoice" => ErrorCode::InvoiceNotFound,
                "Credit note" => ErrorCode::CreditNoteNotFound,
                "Quote" => ErrorCode::QuoteNotFound,
                _ => ErrorCode::NotFound,
            },
            Self::Remote(e) => e.error_code(),
            Self::Device(e) => e.error_code(),
        }
    }

    /// Remote and printer failures may succeed when re-invoked unchanged
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Remote(_) | Self::Device(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::Precondition { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<SalesError> for AppError {
    fn from(err: SalesError) -> Self {
        let code = err.code();
        let app = AppError::with_message(code, err.to_string());
        match &err {
            SalesError::NotFound { id, .. } => app.with_detail("id", id.clone()),
            SalesError::Remote(ClientError::Api { code, status, .. }) => app
                .with_detail("remoteCode", code.clone())
                .with_detail("status", status.as_u16()),
            _ => app,
        }
    }
}

pub type SalesResult<T> = Result<T, SalesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        let err = SalesError::validation(ErrorCode::CartEmpty, "El carrito está vacío");
        assert_eq!(err.code(), ErrorCode::CartEmpty);
        assert!(err.is_validation());
        assert!(!err.is_retryable());

        let err = SalesError::not_found("Invoice", "inv-1");
        assert_eq!(err.code(), ErrorCode::InvoiceNotFound);
        assert_eq!(err.to_string(), "Invoice not found: inv-1");

        let err = SalesError::not_found("Quote", "q-1");
        assert_eq!(err.code(), ErrorCode::QuoteNotFound);

        let err = SalesError::from(ClientError::Internal("boom".into()));
        assert!(err.is_retryable());
        assert_eq!(err.code(), ErrorCode::InternalError);

        let err = SalesError::from(PrintError::Timeout("10.0.0.7:9100".into()));
        assert!(err.is_retryable());
        assert_eq!(err.code(), ErrorCode::PrinterNotAvailable);
    }

    #[test]
    fn test_into_app_error() {
        let app: AppError = SalesError::precondition(
            ErrorCode::CashRegisterClosed,
            "La caja debe estar abierta",
        )
        .into();
        assert_eq!(app.code, ErrorCode::CashRegisterClosed);
        assert_eq!(app.message, "La caja debe estar abierta");

        let app: AppError = SalesError::not_found("Credit note", "cn-9").into();
        assert_eq!(app.code, ErrorCode::CreditNoteNotFound);
        assert_eq!(app.details.unwrap().get("id").unwrap(), "cn-9");
    }
}
