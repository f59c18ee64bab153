//! POS checkout
//!
//! Validates the cart against the cash drawer, submits the sale and resets
//! the cart. Any failure leaves the cart untouched.

use pos_client::SalesApi;
use rust_decimal::Decimal;
use serde::Serialize;
use shared::error::ErrorCode;
use shared::models::{CreatePosSaleRequest, Invoice, PaymentMethod};
use shared::util::format_money;

use crate::cart::{Cart, CartTotals};
use crate::error::{SalesError, SalesResult};
use crate::logger::AUDIT_TARGET;

/// Completed sale
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutReceipt {
    pub sale: Invoice,
    pub totals: CartTotals,
    pub payment_method: PaymentMethod,
    /// Cash handed over (CASH only)
    pub amount_received: Option<Decimal>,
    /// `amount_received - final_total` (CASH only)
    pub change: Option<Decimal>,
}

/// Build the sale request, enforcing every local precondition
async fn prepare(
    api: &dyn SalesApi,
    cart: &Cart,
) -> SalesResult<(CreatePosSaleRequest, CartTotals)> {
    if cart.is_empty() {
        return Err(SalesError::validation(ErrorCode::CartEmpty, "El carrito está vacío"));
    }

    let method = cart.payment_method();
    if !method.is_pos_accepted() {
        return Err(SalesError::validation(
            ErrorCode::PaymentInvalidMethod,
            "El punto de venta solo acepta efectivo, tarjeta o pago mixto",
        ));
    }

    let totals = cart.compute_totals();

    let amount_received = if method == PaymentMethod::Cash {
        let drawer = api.get_cash_drawer_status().await?;
        if !drawer.is_some_and(|register| register.is_open()) {
            return Err(SalesError::precondition(
                ErrorCode::CashRegisterClosed,
                "La caja debe estar abierta para realizar ventas en efectivo",
            ));
        }

        // Unset means exact cash
        let received = cart.amount_received().unwrap_or(totals.final_total);
        if received < totals.final_total {
            return Err(SalesError::validation(
                ErrorCode::PaymentInsufficientAmount,
                format!(
                    "El monto recibido ({}) es menor que el total ({})",
                    format_money(received),
                    format_money(totals.final_total)
                ),
            ));
        }
        Some(received)
    } else {
        None
    };

    let request = CreatePosSaleRequest {
        invoice_type: cart.invoice_type(),
        payment_method: method,
        items: cart.sale_items(),
        discount: cart.general_discount(),
        include_tax: cart.tax_enabled(),
        client_id: cart.client_id().map(str::to_string),
        amount_received,
    };
    Ok((request, totals))
}

/// Submit the cart as a POS sale
///
/// On success the cart is cleared and its settings reset to defaults.
pub async fn checkout(api: &dyn SalesApi, cart: &mut Cart) -> SalesResult<CheckoutReceipt> {
    let (request, totals) = prepare(api, cart).await?;

    tracing::info!(
        lines = request.items.len(),
        method = ?request.payment_method,
        total = %totals.final_total,
        "submitting POS sale"
    );

    let created = api.create_sale(&request).await.map_err(|e| {
        tracing::warn!(error = %e, "POS sale rejected");
        SalesError::from(e)
    })?;

    let change = request
        .amount_received
        .map(|received| received - totals.final_total);

    tracing::info!(
        target: AUDIT_TARGET,
        invoice = %created.sale.number,
        method = ?request.payment_method,
        total = %totals.final_total,
        change = ?change,
        "POS sale completed"
    );

    cart.clear();

    Ok(CheckoutReceipt {
        sale: created.sale,
        totals,
        payment_method: request.payment_method,
        amount_received: request.amount_received,
        change,
    })
}
