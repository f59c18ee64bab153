// In-memory back office for integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use parking_lot::Mutex;
use pos_client::{ClientError, ClientResult, SalesApi};
use rust_decimal::Decimal;
use shared::http::StatusCode;
use shared::models::*;
use shared::{PageQuery, Paginated};
use std::time::Duration;

/// Search text that makes the cancelled-invoice listing answer slowly
pub const SLOW_SEARCH: &str = "slow";

#[derive(Debug, Default)]
pub struct State {
    pub products: Vec<Product>,
    pub stock: Vec<ProductStock>,
    pub clients: Vec<Client>,
    pub register: Option<CashRegister>,
    pub invoices: Vec<Invoice>,
    pub cancelled: Vec<CancelledInvoice>,
    pub credit_notes: Vec<CreditNoteSummary>,
    pub credit_note_details: Vec<CreditNote>,
    pub quotes: Vec<Quote>,

    pub fail_sales: bool,
    pub fail_credit_notes: bool,

    pub sales: Vec<CreatePosSaleRequest>,
    pub cancel_calls: Vec<(String, String)>,
    pub messages: Vec<SendMessageRequest>,
    pub cancelled_pages: Vec<PageQuery>,
    pub credit_note_pages: Vec<PageQuery>,
    pub product_filters: Vec<ProductFilter>,
    pub invoice_filters: Vec<InvoiceFilter>,
    pub credit_note_requests: Vec<CreateCreditNoteRequest>,
    pub quote_requests: Vec<CreateQuoteRequest>,
    pub conversions: Vec<(String, ConvertQuoteRequest)>,
}

#[derive(Debug, Default)]
pub struct FakeSalesApi {
    pub state: Mutex<State>,
}

impl FakeSalesApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_open_register(self) -> Self {
        self.state.lock().register = Some(open_register());
        self
    }
}

fn page_of<T: Clone>(rows: &[T], page: PageQuery) -> Paginated<T> {
    let data = rows
        .iter()
        .skip(page.offset())
        .take(page.limit as usize)
        .cloned()
        .collect();
    Paginated::new(data, page.page, page.limit, rows.len() as u64)
}

#[async_trait]
impl SalesApi for FakeSalesApi {
    async fn list_products(&self, filter: &ProductFilter) -> ClientResult<Paginated<Product>> {
        let mut state = self.state.lock();
        state.product_filters.push(filter.clone());
        let limit = filter.limit.unwrap_or(10);
        let rows: Vec<Product> = state
            .products
            .iter()
            .filter(|p| filter.is_active.is_none_or(|active| p.is_active == active))
            .cloned()
            .collect();
        Ok(page_of(&rows, PageQuery::new(filter.page.unwrap_or(1), limit)))
    }

    async fn get_product_stock(&self, product_id: &str) -> ClientResult<Vec<ProductStock>> {
        let state = self.state.lock();
        Ok(state
            .stock
            .iter()
            .filter(|s| s.product_id == product_id)
            .cloned()
            .collect())
    }

    async fn list_clients(&self, filter: &ClientFilter) -> ClientResult<Paginated<Client>> {
        let state = self.state.lock();
        let search = filter.search.as_deref().unwrap_or_default().to_lowercase();
        let rows: Vec<Client> = state
            .clients
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&search))
            .cloned()
            .collect();
        Ok(page_of(&rows, PageQuery::new(1, filter.limit.unwrap_or(10))))
    }

    async fn get_cash_drawer_status(&self) -> ClientResult<Option<CashRegister>> {
        Ok(self.state.lock().register.clone())
    }

    async fn create_sale(&self, request: &CreatePosSaleRequest) -> ClientResult<CreatedSale> {
        let mut state = self.state.lock();
        if state.fail_sales {
            return Err(ClientError::Internal("Servicio no disponible".into()));
        }
        state.sales.push(request.clone());

        let number = format!("FAC-{:06}", state.sales.len());
        let mut sale = invoice(&format!("inv-{}", state.sales.len()), &number);
        sale.payment_method = Some(request.payment_method);
        sale.invoice_type = Some(request.invoice_type);
        Ok(CreatedSale {
            sale,
            change_amount: None,
            amount_received: request.amount_received,
        })
    }

    async fn list_cancelled_invoices(
        &self,
        query: &CancelledInvoiceQuery,
        page: PageQuery,
    ) -> ClientResult<Paginated<CancelledInvoice>> {
        if query.search.as_deref() == Some(SLOW_SEARCH) {
            tokio::time::sleep(Duration::from_secs(5)).await;
        }

        let mut state = self.state.lock();
        state.cancelled_pages.push(page);
        let rows: Vec<CancelledInvoice> = state
            .cancelled
            .iter()
            .filter(|inv| {
                query.cancelled_by.as_deref().is_none_or(|actor| {
                    inv.cancelled_by.as_ref().is_some_and(|u| u.id == actor)
                })
            })
            .cloned()
            .collect();
        Ok(page_of(&rows, page))
    }

    async fn list_credit_notes(
        &self,
        _query: &CreditNoteQuery,
        page: PageQuery,
    ) -> ClientResult<Paginated<CreditNoteSummary>> {
        let mut state = self.state.lock();
        if state.fail_credit_notes {
            return Err(ClientError::Api {
                status: StatusCode::BAD_GATEWAY,
                code: "UPSTREAM_ERROR".into(),
                message: "Credit note service unavailable".into(),
            });
        }
        state.credit_note_pages.push(page);
        Ok(page_of(&state.credit_notes, page))
    }

    async fn list_invoices(
        &self,
        filter: &InvoiceFilter,
    ) -> ClientResult<Paginated<InvoiceSummary>> {
        let mut state = self.state.lock();
        state.invoice_filters.push(filter.clone());
        let rows: Vec<InvoiceSummary> = state
            .invoices
            .iter()
            .filter(|i| filter.status.is_none_or(|status| i.status == Some(status)))
            .map(|i| InvoiceSummary {
                id: i.id.clone(),
                number: i.number.clone(),
                ncf: i.ncf.clone(),
                client: i.client.clone(),
                branch: None,
                status: i.status.unwrap_or(InvoiceStatus::Issued),
                invoice_type: i.invoice_type,
                payment_method: i.payment_method,
                total: i.total,
                balance: i.balance,
                issue_date: i.issue_date,
                due_date: i.due_date,
            })
            .collect();
        let page = PageQuery::new(filter.page.unwrap_or(1), filter.limit.unwrap_or(10));
        Ok(page_of(&rows, page))
    }

    async fn get_invoice(&self, id: &str) -> ClientResult<Invoice> {
        let state = self.state.lock();
        state
            .invoices
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound("Factura no encontrada".into()))
    }

    async fn get_credit_note(&self, id: &str) -> ClientResult<CreditNote> {
        let state = self.state.lock();
        state
            .credit_note_details
            .iter()
            .find(|n| n.id == id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound("Nota de crédito no encontrada".into()))
    }

    async fn create_credit_note(
        &self,
        request: &CreateCreditNoteRequest,
    ) -> ClientResult<CreatedCreditNote> {
        let mut state = self.state.lock();
        state.credit_note_requests.push(request.clone());
        let n = state.credit_note_requests.len();
        let total: Decimal = request
            .items
            .iter()
            .map(|i| i.quantity * i.price - i.discount)
            .sum();
        Ok(CreatedCreditNote {
            id: format!("cn-new-{n}"),
            number: format!("NC-{n:06}"),
            ncf: None,
            total,
        })
    }

    async fn list_quotes(&self, filter: &QuoteFilter) -> ClientResult<Paginated<QuoteSummary>> {
        let state = self.state.lock();
        let rows: Vec<QuoteSummary> = state
            .quotes
            .iter()
            .filter(|q| filter.status.is_none_or(|status| q.status == status))
            .map(|q| QuoteSummary {
                id: q.id.clone(),
                number: q.number.clone(),
                client: q.client.clone(),
                status: q.status,
                total: q.total,
                valid_until: q.valid_until,
                created_at: q.created_at,
            })
            .collect();
        let page = PageQuery::new(filter.page.unwrap_or(1), filter.limit.unwrap_or(10));
        Ok(page_of(&rows, page))
    }

    async fn get_quote(&self, id: &str) -> ClientResult<Quote> {
        let state = self.state.lock();
        state
            .quotes
            .iter()
            .find(|q| q.id == id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound("Quote not found".into()))
    }

    async fn create_quote(&self, request: &CreateQuoteRequest) -> ClientResult<CreatedQuote> {
        let mut state = self.state.lock();
        state.quote_requests.push(request.clone());
        let n = state.quote_requests.len();
        let subtotal: Decimal = request
            .items
            .iter()
            .map(|i| i.quantity * i.price - i.discount)
            .sum::<Decimal>()
            - request.discount;
        let tax = if request.include_tax {
            subtotal * Decimal::new(18, 2)
        } else {
            Decimal::ZERO
        };
        Ok(CreatedQuote {
            id: format!("q-new-{n}"),
            number: format!("#COT-{n:04}"),
            total: subtotal + tax,
            status: QuoteStatus::Open,
        })
    }

    async fn convert_quote(
        &self,
        id: &str,
        request: &ConvertQuoteRequest,
    ) -> ClientResult<ConvertedInvoice> {
        let mut state = self.state.lock();
        let quote = state
            .quotes
            .iter_mut()
            .find(|q| q.id == id)
            .ok_or_else(|| ClientError::NotFound("Quote not found".into()))?;
        if !quote.is_open() {
            return Err(ClientError::Api {
                status: StatusCode::BAD_REQUEST,
                code: "INVALID_STATUS".into(),
                message: "Only open quotes can be converted".into(),
            });
        }
        quote.status = QuoteStatus::Converted;
        let total = quote.total;

        state.conversions.push((id.to_string(), request.clone()));
        let n = state.conversions.len();
        let balance = if request.payment_method == PaymentMethod::Credit {
            total
        } else {
            Decimal::ZERO
        };
        Ok(ConvertedInvoice {
            id: format!("inv-q-{n}"),
            number: format!("FAC-Q{n:05}"),
            ncf: None,
            total,
            balance,
            status: if balance > Decimal::ZERO {
                InvoiceStatus::Issued
            } else {
                InvoiceStatus::Paid
            },
        })
    }

    async fn cancel_invoice(&self, id: &str, reason: &str) -> ClientResult<CancelInvoiceResponse> {
        let mut state = self.state.lock();
        let invoice = state
            .invoices
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| ClientError::NotFound("Factura no encontrada".into()))?;

        if invoice.is_cancelled() {
            return Err(ClientError::Api {
                status: StatusCode::BAD_REQUEST,
                code: "ALREADY_CANCELLED".into(),
                message: "La factura ya está anulada".into(),
            });
        }
        invoice.status = Some(InvoiceStatus::Cancelled);
        invoice.cancellation_reason = Some(reason.to_string());

        state.cancel_calls.push((id.to_string(), reason.to_string()));
        Ok(CancelInvoiceResponse {
            message: Some("Factura anulada exitosamente".into()),
            invoice: InvoiceStatusRef {
                id: id.to_string(),
                status: InvoiceStatus::Cancelled,
            },
        })
    }

    async fn send_message(
        &self,
        request: &SendMessageRequest,
    ) -> ClientResult<SendMessageResponse> {
        let mut state = self.state.lock();
        state.messages.push(request.clone());
        Ok(SendMessageResponse {
            message_id: Some(format!("wamid-{}", state.messages.len())),
        })
    }
}

// ========== Fixtures ==========

pub fn dec(value: i64) -> Decimal {
    Decimal::from(value)
}

pub fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, day, hour, 0, 0).unwrap()
}

pub fn product(id: &str, name: &str, price: i64) -> Product {
    Product {
        id: id.to_string(),
        code: id.to_uppercase(),
        name: name.to_string(),
        sale_price: dec(price),
        stock: None,
        is_active: true,
    }
}

pub fn client(id: &str, name: &str, phone: Option<&str>) -> Client {
    Client {
        id: id.to_string(),
        name: name.to_string(),
        identification: None,
        phone: phone.map(str::to_string),
        email: None,
        is_active: true,
    }
}

pub fn open_register() -> CashRegister {
    CashRegister {
        id: "reg-1".into(),
        status: CashRegisterStatus::Open,
        branch: None,
        initial_amount: dec(1000),
        current_balance: None,
        opened_at: None,
        opened_by: None,
    }
}

pub fn invoice(id: &str, number: &str) -> Invoice {
    Invoice {
        id: id.to_string(),
        number: number.to_string(),
        ncf: None,
        invoice_type: None,
        status: Some(InvoiceStatus::Paid),
        issue_date: Some(at(10, 15)),
        due_date: None,
        subtotal: dec(200),
        tax: dec(36),
        discount: Decimal::ZERO,
        total: dec(236),
        balance: Decimal::ZERO,
        payment_method: None,
        observations: None,
        client: None,
        items: vec![InvoiceItem {
            id: None,
            product_id: Some("p-1".into()),
            product: None,
            description: "Arroz".into(),
            quantity: dec(2),
            price: dec(100),
            discount: Decimal::ZERO,
            subtotal: dec(200),
        }],
        cancelled_at: None,
        cancellation_reason: None,
        cancelled_by_user: None,
        created_at: Some(at(10, 15)),
    }
}

pub fn cancelled_invoice(id: &str, cancelled_at: DateTime<Utc>) -> CancelledInvoice {
    CancelledInvoice {
        id: id.to_string(),
        number: format!("FAC-{id}"),
        ncf: None,
        client: None,
        total: dec(100),
        cancelled_at: Some(cancelled_at),
        cancellation_reason: Some("Error en precio".into()),
        cancelled_by: Some(EntityRef {
            id: "u-1".into(),
            name: "Ana".into(),
        }),
        created_at: Some(at(1, 12)),
    }
}

pub fn credit_note(id: &str, issue_date: DateTime<Utc>, reason: &str) -> CreditNoteSummary {
    CreditNoteSummary {
        id: id.to_string(),
        number: format!("NC-{id}"),
        ncf: None,
        invoice: None,
        total: dec(50),
        issue_date: Some(issue_date),
        created_at: issue_date,
        reason: reason.to_string(),
    }
}

pub fn quote(id: &str, status: QuoteStatus) -> Quote {
    Quote {
        id: id.to_string(),
        number: format!("#COT-{id}"),
        status,
        client: None,
        items: invoice("inv-x", "FAC-X").items,
        subtotal: dec(200),
        tax: dec(36),
        discount: Decimal::ZERO,
        total: dec(236),
        valid_until: Some(at(31, 12)),
        observations: None,
        converted_to_invoice_id: None,
        created_at: Some(at(2, 9)),
    }
}
