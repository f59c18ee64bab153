//! Outbound messaging payloads

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Delivery channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageChannel {
    #[default]
    Whatsapp,
}

/// Server-side message template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageTemplate {
    Invoice,
    Quote,
    Payment,
    Reminder,
    Custom,
}

/// Body of `POST /whatsapp/send`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub phone: String,
    pub template_type: MessageTemplate,
    pub variables: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageResponse {
    #[serde(default)]
    pub message_id: Option<String>,
}
