//! HTTP client for the sales back office

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use shared::models::{
    CancelInvoiceRequest, CancelInvoiceResponse, CancelledInvoice, CancelledInvoiceQuery,
    CashRegister, Client as Customer, ClientFilter, ConvertQuoteRequest, ConvertedInvoice,
    CreateCreditNoteRequest, CreatePosSaleRequest, CreateQuoteRequest, CreatedCreditNote,
    CreatedQuote, CreatedSale, CreditNote, CreditNoteQuery, CreditNoteSummary, Invoice,
    InvoiceFilter, InvoiceSummary, Product, ProductFilter, ProductStock, Quote, QuoteFilter,
    QuoteSummary, SendMessageRequest, SendMessageResponse,
};
use shared::{PageQuery, Paginated};

use crate::{ClientConfig, ClientError, ClientResult, SalesApi};

/// Rows requested per stock lookup
const STOCK_PAGE_LIMIT: u32 = 100;

/// Error body: `{"error":{"code":"NOT_FOUND","message":"Invoice not found"}}`
#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StockQuery<'a> {
    product_id: &'a str,
    limit: u32,
}

/// Network HTTP client
#[derive(Debug, Clone)]
pub struct NetworkSalesClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl NetworkSalesClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let base_url = config.base_url.trim_end_matches('/');
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "base URL must be http(s): {:?}",
                config.base_url
            )));
        }

        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.to_string(),
            token: config.token.clone(),
        })
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");
        let response = self.authorize(self.client.get(&url)).send().await?;
        Self::handle_response(response).await
    }

    async fn get_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<T> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");
        let response = self
            .authorize(self.client.get(&url).query(query))
            .send()
            .await?;
        Self::handle_response(response).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = self.url(path);
        tracing::debug!(%url, "POST");
        let response = self
            .authorize(self.client.post(&url).json(body))
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let body = serde_json::from_str::<ErrorEnvelope>(&text).ok().map(|e| e.error);
            let message = body
                .as_ref()
                .map(|b| b.message.clone())
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| text.clone());
            tracing::warn!(status = status.as_u16(), %message, "back office returned an error");

            return match (status, body) {
                (StatusCode::UNAUTHORIZED, _) => Err(ClientError::Unauthorized),
                (StatusCode::FORBIDDEN, _) => Err(ClientError::Forbidden(message)),
                (StatusCode::NOT_FOUND, _) => Err(ClientError::NotFound(message)),
                (_, Some(body)) if !body.code.is_empty() => Err(ClientError::Api {
                    status,
                    code: body.code,
                    message,
                }),
                (StatusCode::BAD_REQUEST, _) => Err(ClientError::Validation(message)),
                _ => Err(ClientError::Internal(message)),
            };
        }

        serde_json::from_str(&text).map_err(|e| {
            ClientError::InvalidResponse(format!("{e} (status {})", status.as_u16()))
        })
    }
}

#[async_trait]
impl SalesApi for NetworkSalesClient {
    async fn list_products(&self, filter: &ProductFilter) -> ClientResult<Paginated<Product>> {
        self.get_query("inventory/products", filter).await
    }

    async fn get_product_stock(&self, product_id: &str) -> ClientResult<Vec<ProductStock>> {
        let query = StockQuery {
            product_id,
            limit: STOCK_PAGE_LIMIT,
        };
        let page: Paginated<ProductStock> = self.get_query("inventory/stock", &query).await?;
        Ok(page
            .data
            .into_iter()
            .filter(|s| s.product_id == product_id)
            .collect())
    }

    async fn list_clients(&self, filter: &ClientFilter) -> ClientResult<Paginated<Customer>> {
        self.get_query("clients", filter).await
    }

    async fn get_cash_drawer_status(&self) -> ClientResult<Option<CashRegister>> {
        let registers: Vec<CashRegister> = self.get("cash/current").await?;
        Ok(registers.into_iter().find(CashRegister::is_open))
    }

    async fn create_sale(&self, request: &CreatePosSaleRequest) -> ClientResult<CreatedSale> {
        self.post("sales/pos", request).await
    }

    async fn list_cancelled_invoices(
        &self,
        query: &CancelledInvoiceQuery,
        page: PageQuery,
    ) -> ClientResult<Paginated<CancelledInvoice>> {
        #[derive(Serialize)]
        struct Params<'a> {
            #[serde(flatten)]
            query: &'a CancelledInvoiceQuery,
            #[serde(flatten)]
            page: PageQuery,
        }
        self.get_query("sales/cancelled", &Params { query, page }).await
    }

    async fn list_credit_notes(
        &self,
        query: &CreditNoteQuery,
        page: PageQuery,
    ) -> ClientResult<Paginated<CreditNoteSummary>> {
        #[derive(Serialize)]
        struct Params<'a> {
            #[serde(flatten)]
            query: &'a CreditNoteQuery,
            #[serde(flatten)]
            page: PageQuery,
        }
        self.get_query("sales/credit-notes", &Params { query, page }).await
    }

    async fn list_invoices(
        &self,
        filter: &InvoiceFilter,
    ) -> ClientResult<Paginated<InvoiceSummary>> {
        self.get_query("sales/invoices", filter).await
    }

    async fn get_invoice(&self, id: &str) -> ClientResult<Invoice> {
        self.get(&format!("sales/invoices/{id}")).await
    }

    async fn get_credit_note(&self, id: &str) -> ClientResult<CreditNote> {
        self.get(&format!("sales/credit-notes/{id}")).await
    }

    async fn create_credit_note(
        &self,
        request: &CreateCreditNoteRequest,
    ) -> ClientResult<CreatedCreditNote> {
        self.post("sales/credit-notes", request).await
    }

    async fn list_quotes(&self, filter: &QuoteFilter) -> ClientResult<Paginated<QuoteSummary>> {
        self.get_query("sales/quotes", filter).await
    }

    async fn get_quote(&self, id: &str) -> ClientResult<Quote> {
        self.get(&format!("sales/quotes/{id}")).await
    }

    async fn create_quote(&self, request: &CreateQuoteRequest) -> ClientResult<CreatedQuote> {
        self.post("sales/quotes", request).await
    }

    async fn convert_quote(
        &self,
        id: &str,
        request: &ConvertQuoteRequest,
    ) -> ClientResult<ConvertedInvoice> {
        self.post(&format!("sales/quotes/{id}/convert"), request).await
    }

    async fn cancel_invoice(&self, id: &str, reason: &str) -> ClientResult<CancelInvoiceResponse> {
        let body = CancelInvoiceRequest {
            reason: reason.to_string(),
        };
        self.post(&format!("sales/invoices/{id}/cancel"), &body).await
    }

    async fn send_message(
        &self,
        request: &SendMessageRequest,
    ) -> ClientResult<SendMessageResponse> {
        self.post("whatsapp/send", request).await
    }
}
