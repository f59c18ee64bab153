//! Shared types for the POS workspace
//!
//! Wire models exchanged with the sales back office, the unified error
//! system, pagination envelopes and display formatting helpers.

pub mod error;
pub mod models;
pub mod pagination;
pub mod util;

// Re-exports
pub use http;
pub use rust_decimal::Decimal;
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use pagination::{PageQuery, Paginated, Pagination};
