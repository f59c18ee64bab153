//! POS engine - point-of-sale checkout and cancelled-documents history
//!
//! # Overview
//!
//! - **Cart** (`cart`): line pricing, discounts, ITBIS and totals
//! - **Checkout** (`checkout`): cash drawer and payment checks, sale submission
//! - **Cancelled documents** (`cancelled`): voided invoices and credit notes
//!   merged into one paginated history
//! - **Catalog** (`catalog`): product and client lookup
//! - **Documents** (`documents`): list, load, void and print invoices; issue
//!   and print credit notes
//! - **Quotes** (`quotes`): save the cart as a quote, print and convert quotes
//! - **Messaging** (`messaging`): WhatsApp delivery of documents
//!
//! Network access goes through [`pos_client::SalesApi`]; every operation takes
//! the API as `&dyn SalesApi` so tests can run against an in-memory fake.
//!
//! ```text
//! pos-engine/src/
//! ├── cart/          # Cart state and totals
//! ├── cancelled/     # History aggregation and view state
//! ├── checkout.rs
//! ├── catalog.rs
//! ├── documents.rs
//! ├── messaging.rs
//! ├── quotes.rs
//! ├── config.rs      # Environment configuration
//! ├── error.rs       # SalesError
//! └── logger.rs      # tracing setup
//! ```

pub mod cancelled;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod documents;
pub mod error;
pub mod logger;
pub mod messaging;
pub mod quotes;

// Re-exports
pub use cancelled::{
    CancelledDocument, CancelledFilter, CancelledHistory, CancelledPage, DocumentKind,
    HistoryLoad, fetch_page,
};
pub use cart::{Cart, CartLine, CartTotals, TAX_RATE};
pub use checkout::{CheckoutReceipt, checkout};
pub use config::PosConfig;
pub use error::{SalesError, SalesResult};
pub use logger::{cleanup_old_logs, init_logger, init_logger_with_file};
pub use messaging::{MessageDocument, send_document_message};
pub use quotes::QuoteOptions;

/// Load `.env`, read configuration and start logging
pub fn setup_environment() -> anyhow::Result<PosConfig> {
    // A missing .env file is fine; the process environment still applies
    dotenv::dotenv().ok();

    let config = PosConfig::from_env();
    init_logger_with_file(&config.log_level, config.log_json, config.log_dir.as_deref())?;

    tracing::info!(
        api_url = %config.api_url,
        printer = ?config.printer_addr,
        "POS environment ready"
    );
    Ok(config)
}
