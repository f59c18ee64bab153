//! Unified error system for the POS workspace
//!
//! This module provides:
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Customer errors
//! - 4xxx: Sales document errors
//! - 5xxx: Payment errors
//! - 6xxx: Product errors
//! - 7xxx: Cash register errors
//! - 8xxx: Messaging errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::CartEmpty);
//! assert_eq!(err.message, "Cart is empty");
//!
//! let err = AppError::validation("Insufficient cash")
//!     .with_detail("finalTotal", "236.00");
//! assert_eq!(err.code, ErrorCode::ValidationFailed);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult};
