//! Client error types

use http::StatusCode;
use shared::error::ErrorCode;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Back office rejected the request with an error body
    #[error("API error {status} ({code}): {message}")]
    Api {
        status: StatusCode,
        code: String,
        message: String,
    },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Client could not be built from its configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Unified error code for this failure
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::Http(e) if e.is_timeout() => ErrorCode::TimeoutError,
            Self::Http(_) => ErrorCode::NetworkError,
            Self::Api { status, code, .. } => {
                ErrorCode::from_remote(code).unwrap_or_else(|| ErrorCode::from_status(*status))
            }
            Self::InvalidResponse(_) | Self::Serialization(_) => ErrorCode::InvalidFormat,
            Self::Unauthorized => ErrorCode::NotAuthenticated,
            Self::Forbidden(_) => ErrorCode::PermissionDenied,
            Self::NotFound(_) => ErrorCode::NotFound,
            Self::Validation(_) => ErrorCode::ValidationFailed,
            Self::Internal(_) => ErrorCode::InternalError,
            Self::Config(_) => ErrorCode::ConfigError,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Remote error code string, when the back office sent one
    pub fn remote_code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => Some(code),
            _ => None,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
