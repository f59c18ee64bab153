//! Error types for the printer library

use shared::error::ErrorCode;
use thiserror::Error;

/// Printer error types
#[derive(Debug, Error)]
pub enum PrintError {
    /// Network connection error
    #[error("Connection failed: {0}")]
    Connection(String),

    /// IO error during printing
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Timeout waiting for printer
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Invalid printer configuration
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

impl PrintError {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::Connection(_) | Self::Timeout(_) => ErrorCode::PrinterNotAvailable,
            Self::InvalidConfig(_) => ErrorCode::ConfigError,
            Self::Io(_) => ErrorCode::PrintFailed,
        }
    }
}

/// Result type for printer operations
pub type PrintResult<T> = Result<T, PrintError>;
