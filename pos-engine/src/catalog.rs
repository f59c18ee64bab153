//! Product and client lookup for the POS screen

use pos_client::SalesApi;
use rust_decimal::Decimal;
use shared::models::{Client, ClientFilter, Product, ProductFilter};

use crate::error::SalesResult;

const PRODUCT_LIMIT: u32 = 200;
const CLIENT_LIMIT: u32 = 100;

fn search_term(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Active products, narrowed by name or code
pub async fn load_products(api: &dyn SalesApi, search: Option<&str>) -> SalesResult<Vec<Product>> {
    let filter = ProductFilter {
        search: search_term(search),
        is_active: Some(true),
        page: Some(1),
        limit: Some(PRODUCT_LIMIT),
    };
    let page = api.list_products(&filter).await?;

    let products: Vec<Product> = page
        .data
        .into_iter()
        .filter(|p| p.is_active && search.is_none_or(|q| p.matches(q)))
        .collect();
    tracing::debug!(count = products.len(), "products loaded");
    Ok(products)
}

/// Case-insensitive match on name or code; a blank query keeps everything
pub fn filter_products<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    products.iter().filter(|p| p.matches(query)).collect()
}

/// Units on hand across all branches
pub async fn stock_on_hand(api: &dyn SalesApi, product_id: &str) -> SalesResult<Decimal> {
    let rows = api.get_product_stock(product_id).await?;
    Ok(rows.iter().map(|r| r.quantity).sum())
}

pub async fn load_clients(api: &dyn SalesApi, search: Option<&str>) -> SalesResult<Vec<Client>> {
    let filter = ClientFilter {
        search: search_term(search),
        is_active: Some(true),
        page: Some(1),
        limit: Some(CLIENT_LIMIT),
    };
    let page = api.list_clients(&filter).await?;
    Ok(page.data.into_iter().filter(|c| c.is_active).collect())
}
