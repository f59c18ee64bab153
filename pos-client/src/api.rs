//! Back-office operations used by the point of sale

use async_trait::async_trait;
use shared::models::{
    CancelInvoiceResponse, CancelledInvoice, CancelledInvoiceQuery, CashRegister, Client,
    ClientFilter, ConvertQuoteRequest, ConvertedInvoice, CreateCreditNoteRequest,
    CreatePosSaleRequest, CreateQuoteRequest, CreatedCreditNote, CreatedQuote, CreatedSale,
    CreditNote, CreditNoteQuery, CreditNoteSummary, Invoice, InvoiceFilter, InvoiceSummary,
    Product, ProductFilter, ProductStock, Quote, QuoteFilter, QuoteSummary, SendMessageRequest,
    SendMessageResponse,
};
use shared::{PageQuery, Paginated};

use crate::ClientResult;

/// Sales back-office API
///
/// `NetworkSalesClient` talks to the REST service; tests substitute an
/// in-memory implementation.
#[async_trait]
pub trait SalesApi: Send + Sync {
    async fn list_products(&self, filter: &ProductFilter) -> ClientResult<Paginated<Product>>;

    /// Stock rows of one product across branches
    async fn get_product_stock(&self, product_id: &str) -> ClientResult<Vec<ProductStock>>;

    async fn list_clients(&self, filter: &ClientFilter) -> ClientResult<Paginated<Client>>;

    /// The open cash register session, if any
    async fn get_cash_drawer_status(&self) -> ClientResult<Option<CashRegister>>;

    async fn create_sale(&self, request: &CreatePosSaleRequest) -> ClientResult<CreatedSale>;

    async fn list_cancelled_invoices(
        &self,
        query: &CancelledInvoiceQuery,
        page: PageQuery,
    ) -> ClientResult<Paginated<CancelledInvoice>>;

    async fn list_credit_notes(
        &self,
        query: &CreditNoteQuery,
        page: PageQuery,
    ) -> ClientResult<Paginated<CreditNoteSummary>>;

    async fn list_invoices(
        &self,
        filter: &InvoiceFilter,
    ) -> ClientResult<Paginated<InvoiceSummary>>;

    async fn get_invoice(&self, id: &str) -> ClientResult<Invoice>;

    async fn get_credit_note(&self, id: &str) -> ClientResult<CreditNote>;

    /// Issue a credit note against an invoice
    async fn create_credit_note(
        &self,
        request: &CreateCreditNoteRequest,
    ) -> ClientResult<CreatedCreditNote>;

    async fn list_quotes(&self, filter: &QuoteFilter) -> ClientResult<Paginated<QuoteSummary>>;

    async fn get_quote(&self, id: &str) -> ClientResult<Quote>;

    async fn create_quote(&self, request: &CreateQuoteRequest) -> ClientResult<CreatedQuote>;

    /// Turn an open quote into an invoice
    async fn convert_quote(
        &self,
        id: &str,
        request: &ConvertQuoteRequest,
    ) -> ClientResult<ConvertedInvoice>;

    async fn cancel_invoice(&self, id: &str, reason: &str) -> ClientResult<CancelInvoiceResponse>;

    async fn send_message(&self, request: &SendMessageRequest) -> ClientResult<SendMessageResponse>;
}
