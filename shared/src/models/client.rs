//! Client (customer) Model

use serde::{Deserialize, Serialize};

use super::default_true;

/// Customer record
///
/// Embedded payloads (invoice, cancelled listing) carry only a subset of
/// the fields, so everything but `id` and `name` is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    pub name: String,
    /// RNC or cédula
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identification: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Query for `GET /clients`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_client_defaults() {
        let client: Client = serde_json::from_str(r#"{"id":"c-1","name":"Ferretería Núñez"}"#).unwrap();
        assert_eq!(client.name, "Ferretería Núñez");
        assert!(client.phone.is_none());
        assert!(client.is_active);
    }
}
