//! Data models
//!
//! Wire types exchanged with the sales back office.
//! JSON is camelCase, amounts are numbers (held as `Decimal`),
//! dates are ISO-8601 timestamps. All IDs are opaque strings.

pub mod cash_register;
pub mod client;
pub mod company;
pub mod credit_note;
pub mod invoice;
pub mod message;
pub mod product;
pub mod quote;
pub mod reference;
pub mod role;
pub mod sale;

// Re-exports
pub use cash_register::*;
pub use client::*;
pub use company::*;
pub use credit_note::*;
pub use invoice::*;
pub use message::*;
pub use product::*;
pub use quote::*;
pub use reference::*;
pub use role::*;
pub use sale::*;

pub(crate) fn default_true() -> bool {
    true
}
