//! Quotes (cotizaciones): save the cart as a quote, browse, print, convert

use chrono::{DateTime, Utc};
use pos_client::SalesApi;
use pos_printer::PrintableDocument;
use shared::Paginated;
use shared::error::ErrorCode;
use shared::models::{
    CompanyProfile, ConvertQuoteRequest, ConvertedInvoice, CreateQuoteRequest, CreatedQuote,
    PaymentMethod, Quote, QuoteFilter, QuoteSummary,
};

use crate::cart::Cart;
use crate::documents::lookup_error;
use crate::error::{SalesError, SalesResult};
use crate::logger::AUDIT_TARGET;

pub(crate) const QUOTE: &str = "Quote";

/// Optional header fields of a new quote
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuoteOptions {
    pub valid_until: Option<DateTime<Utc>>,
    pub observations: Option<String>,
}

pub async fn load_quotes(
    api: &dyn SalesApi,
    filter: &QuoteFilter,
) -> SalesResult<Paginated<QuoteSummary>> {
    Ok(api.list_quotes(filter).await?)
}

pub async fn load_quote(api: &dyn SalesApi, id: &str) -> SalesResult<Quote> {
    api.get_quote(id).await.map_err(lookup_error(QUOTE, id))
}

/// Quote body for the cart's lines, discount, tax flag and client
pub fn quote_from_cart(cart: &Cart, options: QuoteOptions) -> SalesResult<CreateQuoteRequest> {
    if cart.is_empty() {
        return Err(SalesError::validation(ErrorCode::CartEmpty, "El carrito está vacío"));
    }
    Ok(CreateQuoteRequest {
        client_id: cart.client_id().map(str::to_string),
        items: cart.sale_items(),
        discount: cart.general_discount(),
        valid_until: options.valid_until,
        observations: options.observations.filter(|o| !o.trim().is_empty()),
        include_tax: cart.tax_enabled(),
    })
}

/// Save the cart as an open quote
///
/// The cart is left as is; a quote does not consume it.
pub async fn save_quote(
    api: &dyn SalesApi,
    cart: &Cart,
    options: QuoteOptions,
) -> SalesResult<CreatedQuote> {
    let request = quote_from_cart(cart, options)?;
    let created = api.create_quote(&request).await?;

    tracing::info!(
        quote = %created.number,
        lines = request.items.len(),
        total = %created.total,
        "quote saved"
    );
    Ok(created)
}

/// Convert an open quote into an invoice
///
/// Cash conversions need an open cash drawer, same as a cash sale.
pub async fn convert_quote(
    api: &dyn SalesApi,
    id: &str,
    request: &ConvertQuoteRequest,
) -> SalesResult<ConvertedInvoice> {
    let quote = load_quote(api, id).await?;
    if !quote.is_open() {
        return Err(SalesError::precondition(
            ErrorCode::DocumentStatusInvalid,
            format!(
                "Solo se pueden convertir cotizaciones abiertas ({} está {})",
                quote.number,
                quote.status.label().to_lowercase()
            ),
        ));
    }

    if request.payment_method == PaymentMethod::Cash {
        let drawer = api.get_cash_drawer_status().await?;
        if !drawer.is_some_and(|register| register.is_open()) {
            return Err(SalesError::precondition(
                ErrorCode::CashRegisterClosed,
                "La caja debe estar abierta para facturar en efectivo",
            ));
        }
    }

    let invoice = api
        .convert_quote(id, request)
        .await
        .map_err(lookup_error(QUOTE, id))?;

    tracing::info!(
        target: AUDIT_TARGET,
        quote = %quote.number,
        invoice = %invoice.number,
        method = ?request.payment_method,
        total = %invoice.total,
        "quote converted"
    );
    Ok(invoice)
}

/// Load a quote and render it for printing
pub async fn print_quote(
    api: &dyn SalesApi,
    id: &str,
    company: &CompanyProfile,
) -> SalesResult<PrintableDocument> {
    let quote = load_quote(api, id).await?;
    let document = pos_printer::render_quote(&quote, company);
    tracing::debug!(quote = %quote.number, bytes = document.html.len(), "quote rendered");
    Ok(document)
}
