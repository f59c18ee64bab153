//! Send invoices and credit notes to the client over WhatsApp

use chrono::Utc;
use pos_client::SalesApi;
use rust_decimal::Decimal;
use shared::error::ErrorCode;
use shared::models::{
    Client, CreditNote, Invoice, MessageChannel, MessageTemplate, SendMessageRequest,
    SendMessageResponse,
};
use shared::util::{format_date_long, format_money};
use std::collections::BTreeMap;

use crate::error::{SalesError, SalesResult};

const MIN_PHONE_DIGITS: usize = 10;

/// Document to send
#[derive(Debug, Clone, Copy)]
pub enum MessageDocument<'a> {
    Invoice(&'a Invoice),
    CreditNote(&'a CreditNote),
}

impl MessageDocument<'_> {
    fn client(&self) -> Option<&Client> {
        match self {
            Self::Invoice(invoice) => invoice.client.as_ref(),
            Self::CreditNote(note) => note.client(),
        }
    }

    fn number(&self) -> &str {
        match self {
            Self::Invoice(invoice) => &invoice.number,
            Self::CreditNote(note) => &note.number,
        }
    }
}

/// Client phone with whitespace stripped; at least ten digits required
fn recipient_phone(client: Option<&Client>) -> SalesResult<String> {
    let phone: String = client
        .and_then(|c| c.phone.as_deref())
        .unwrap_or_default()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    if phone.is_empty() {
        return Err(SalesError::validation(
            ErrorCode::RecipientPhoneMissing,
            "El cliente no tiene número de teléfono registrado",
        ));
    }
    if phone.chars().filter(char::is_ascii_digit).count() < MIN_PHONE_DIGITS {
        return Err(SalesError::validation(
            ErrorCode::RecipientPhoneInvalid,
            "El número de teléfono del cliente no es válido",
        ));
    }
    Ok(phone)
}

/// `"1. Arroz - 2.00 x RD$50.00 = RD$100.00"`, one line per item
fn items_text<'a>(items: impl Iterator<Item = (&'a str, Decimal, Decimal, Decimal)>) -> String {
    items
        .enumerate()
        .map(|(i, (name, quantity, price, subtotal))| {
            format!(
                "{}. {} - {:.2} x {} = {}",
                i + 1,
                name,
                quantity,
                format_money(price),
                format_money(subtotal)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn client_name(client: Option<&Client>) -> String {
    client
        .map(|c| c.name.clone())
        .unwrap_or_else(|| "Cliente".to_string())
}

fn or_na(value: Option<&String>) -> String {
    value.cloned().unwrap_or_else(|| "N/A".to_string())
}

/// Build the template message for a document
pub fn build_message(document: MessageDocument<'_>) -> SalesResult<SendMessageRequest> {
    let phone = recipient_phone(document.client())?;
    let mut variables = BTreeMap::new();

    let template_type = match document {
        MessageDocument::Invoice(invoice) => {
            let date = invoice.issue_date.unwrap_or_else(Utc::now);
            variables.insert("number".into(), invoice.number.clone());
            variables.insert("ncf".into(), or_na(invoice.ncf.as_ref()));
            variables.insert("clientName".into(), client_name(invoice.client.as_ref()));
            variables.insert("total".into(), format_money(invoice.total));
            variables.insert("date".into(), format_date_long(date));
            variables.insert(
                "items".into(),
                items_text(invoice.items.iter().map(|item| {
                    (item.display_name(), item.quantity, item.price, item.subtotal)
                })),
            );
            variables.insert("balance".into(), format_money(invoice.balance));
            MessageTemplate::Invoice
        }
        MessageDocument::CreditNote(note) => {
            let date = note.issue_date.or(note.created_at).unwrap_or_else(Utc::now);
            variables.insert("number".into(), note.number.clone());
            variables.insert("ncf".into(), or_na(note.ncf.as_ref()));
            variables.insert(
                "invoiceNumber".into(),
                or_na(note.invoice.as_ref().map(|i| &i.number)),
            );
            variables.insert("clientName".into(), client_name(note.client()));
            variables.insert("total".into(), format_money(note.total));
            variables.insert("date".into(), format_date_long(date));
            variables.insert("reason".into(), note.reason.clone());
            variables.insert(
                "items".into(),
                items_text(note.items.iter().map(|item| {
                    (item.display_name(), item.quantity, item.price, item.subtotal)
                })),
            );
            MessageTemplate::Custom
        }
    };

    Ok(SendMessageRequest {
        phone,
        template_type,
        variables,
    })
}

/// Send a document to its client
pub async fn send_document_message(
    api: &dyn SalesApi,
    document: MessageDocument<'_>,
    channel: MessageChannel,
) -> SalesResult<SendMessageResponse> {
    let request = build_message(document)?;

    let response = match channel {
        MessageChannel::Whatsapp => api.send_message(&request).await?,
    };

    tracing::info!(
        document = %document.number(),
        template = ?request.template_type,
        message_id = ?response.message_id,
        "document message sent"
    );
    Ok(response)
}
