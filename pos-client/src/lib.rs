//! POS Client - HTTP client for the sales back office
//!
//! [`SalesApi`] is the contract the point of sale consumes;
//! [`NetworkSalesClient`] implements it over REST with a bearer token.

pub mod api;
pub mod config;
pub mod error;
pub mod http;

pub use api::SalesApi;
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{ClientError, ClientResult};
pub use http::NetworkSalesClient;
