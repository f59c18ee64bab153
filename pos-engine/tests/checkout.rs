// pos-engine/tests/checkout.rs
// Checkout against the in-memory back office

mod common;

use common::{FakeSalesApi, dec, product};
use pos_engine::{Cart, SalesError, checkout};
use shared::error::ErrorCode;
use shared::models::{CashRegisterStatus, InvoiceType, PaymentMethod};

/// One line, qty 2 × 100, ITBIS on: final total 236
fn cart_236() -> Cart {
    let mut cart = Cart::new();
    let arroz = product("p-1", "Arroz", 100);
    cart.add_line(&arroz);
    cart.add_line(&arroz);
    cart.set_tax_enabled(true);
    cart
}

#[tokio::test]
async fn test_cash_sale_returns_change() {
    let api = FakeSalesApi::new().with_open_register();
    let mut cart = cart_236();
    cart.set_amount_received(Some(dec(300)));

    let receipt = checkout(&api, &mut cart).await.unwrap();

    assert_eq!(receipt.totals.final_total, dec(236));
    assert_eq!(receipt.amount_received, Some(dec(300)));
    assert_eq!(receipt.change, Some(dec(64)));
    assert_eq!(receipt.payment_method, PaymentMethod::Cash);
    assert_eq!(receipt.sale.number, "FAC-000001");

    let state = api.state.lock();
    let sent = &state.sales[0];
    assert_eq!(sent.invoice_type, InvoiceType::Fiscal);
    assert!(sent.include_tax);
    assert_eq!(sent.amount_received, Some(dec(300)));
    assert_eq!(sent.items.len(), 1);
    assert_eq!(sent.items[0].quantity, dec(2));
    assert_eq!(sent.items[0].price, dec(100));
}

#[tokio::test]
async fn test_success_resets_cart() {
    let api = FakeSalesApi::new().with_open_register();
    let mut cart = cart_236();
    cart.set_general_discount(dec(10));
    cart.set_client(Some("c-1".into()));

    checkout(&api, &mut cart).await.unwrap();

    assert_eq!(cart, Cart::new());
    assert!(cart.is_empty());
    assert_eq!(cart.general_discount(), dec(0));
    assert!(!cart.tax_enabled());
    assert_eq!(cart.payment_method(), PaymentMethod::Cash);
}

#[tokio::test]
async fn test_insufficient_cash_is_rejected() {
    let api = FakeSalesApi::new().with_open_register();
    let mut cart = cart_236();
    cart.set_amount_received(Some(dec(200)));
    let before = cart.clone();

    let err = checkout(&api, &mut cart).await.unwrap_err();

    assert!(err.is_validation());
    assert_eq!(err.code(), ErrorCode::PaymentInsufficientAmount);
    assert_eq!(cart, before);
    assert!(api.state.lock().sales.is_empty());
}

#[tokio::test]
async fn test_unset_amount_means_exact_cash() {
    let api = FakeSalesApi::new().with_open_register();
    let mut cart = cart_236();

    let receipt = checkout(&api, &mut cart).await.unwrap();

    assert_eq!(receipt.amount_received, Some(dec(236)));
    assert_eq!(receipt.change, Some(dec(0)));
}

#[tokio::test]
async fn test_empty_cart_is_rejected() {
    let api = FakeSalesApi::new().with_open_register();
    let mut cart = Cart::new();

    let err = checkout(&api, &mut cart).await.unwrap_err();
    assert!(matches!(
        err,
        SalesError::Validation {
            code: ErrorCode::CartEmpty,
            ..
        }
    ));
}

#[tokio::test]
async fn test_cash_needs_open_drawer() {
    let api = FakeSalesApi::new();
    let mut cart = cart_236();
    cart.set_amount_received(Some(dec(300)));
    let before = cart.clone();

    let err = checkout(&api, &mut cart).await.unwrap_err();
    assert!(err.is_precondition());
    assert_eq!(err.code(), ErrorCode::CashRegisterClosed);
    assert_eq!(cart, before);

    // A register reported but not open counts as closed
    let api = FakeSalesApi::new().with_open_register();
    if let Some(register) = api.state.lock().register.as_mut() {
        register.status = CashRegisterStatus::Closed;
    }
    let err = checkout(&api, &mut cart).await.unwrap_err();
    assert!(err.is_precondition());
}

#[tokio::test]
async fn test_card_sale_skips_drawer() {
    let api = FakeSalesApi::new();
    let mut cart = cart_236();
    cart.set_payment_method(PaymentMethod::Card);

    let receipt = checkout(&api, &mut cart).await.unwrap();

    assert_eq!(receipt.payment_method, PaymentMethod::Card);
    assert!(receipt.amount_received.is_none());
    assert!(receipt.change.is_none());
    assert!(api.state.lock().sales[0].amount_received.is_none());
}

#[tokio::test]
async fn test_transfer_not_accepted_at_pos() {
    let api = FakeSalesApi::new().with_open_register();
    let mut cart = cart_236();
    cart.set_payment_method(PaymentMethod::Transfer);

    let err = checkout(&api, &mut cart).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::PaymentInvalidMethod);
}

#[tokio::test]
async fn test_remote_failure_keeps_cart_for_retry() {
    let api = FakeSalesApi::new().with_open_register();
    api.state.lock().fail_sales = true;
    let mut cart = cart_236();
    cart.set_amount_received(Some(dec(300)));
    let before = cart.clone();

    let err = checkout(&api, &mut cart).await.unwrap_err();
    assert!(err.is_retryable());
    assert_eq!(cart, before);

    api.state.lock().fail_sales = false;
    let receipt = checkout(&api, &mut cart).await.unwrap();
    assert_eq!(receipt.change, Some(dec(64)));
    assert!(cart.is_empty());
}

#[tokio::test]
async fn test_non_fiscal_sale_without_tax() {
    let api = FakeSalesApi::new();
    let mut cart = Cart::new();
    cart.add_line(&product("p-2", "Habichuelas", 75));
    cart.set_payment_method(PaymentMethod::Mixed);

    let receipt = checkout(&api, &mut cart).await.unwrap();
    assert_eq!(receipt.totals.tax, dec(0));
    assert_eq!(receipt.totals.final_total, dec(75));

    let state = api.state.lock();
    assert_eq!(state.sales[0].invoice_type, InvoiceType::NonFiscal);
    assert!(!state.sales[0].include_tax);
}
