//! # pos-printer
//!
//! Document output for the point of sale.
//!
//! ## Scope
//!
//! - Printable HTML for invoices and credit notes (letter size, browser print)
//! - ESC/POS receipt tickets for 80 mm and 58 mm thermal printers
//! - Windows-1252 text encoding so Spanish characters survive the printer
//! - Network printing (TCP port 9100)
//!
//! Which document to print and when stays in `pos-engine`.
//!
//! ## Example
//!
//! ```ignore
//! use pos_printer::{PaperWidth, Printer, ReceiptTicket, ThermalPrinter};
//!
//! let ticket = ReceiptTicket::new(&company, &invoice).with_cash(received, change);
//! let printer = ThermalPrinter::from_addr("192.168.1.100:9100")?;
//! printer.send(&ticket.render(PaperWidth::Mm80)).await?;
//! ```

mod document;
mod encoding;
mod error;
mod escpos;
mod html;
mod printer;
mod receipt;

// Re-exports
pub use document::{PrintableDocument, render_credit_note, render_invoice, render_quote};
pub use encoding::{encode_cp1252, pad_text, text_width, truncate_text};
pub use error::{PrintError, PrintResult};
pub use escpos::EscPosBuilder;
pub use html::escape;
pub use printer::{DEFAULT_PORT, Printer, ThermalPrinter};
pub use receipt::{PaperWidth, ReceiptTicket};
