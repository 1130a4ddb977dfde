use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::products::repo_types::Product;

/// Request body for product creation. String fields default to empty and the
/// numeric fields stay optional so presence is checked by the use case, with
/// its own message, instead of by body deserialization.
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub product_type: String,
    #[serde(default)]
    pub sku: String,
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<i32>,
    pub price: Option<Decimal>,
}

/// Request body for the quantity update.
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: Option<i32>,
}

/// Pagination query on the listing endpoint.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Stock classification shown next to each product. The thresholds are a
/// fixed contract with the dashboard: 0 is out of stock, 1-10 is low stock,
/// above 10 is in stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StockStatus {
    #[serde(rename = "In Stock")]
    InStock,
    #[serde(rename = "Low Stock")]
    LowStock,
    #[serde(rename = "Out of Stock")]
    OutOfStock,
}

impl StockStatus {
    pub fn classify(quantity: i32) -> Self {
        match quantity {
            0 => StockStatus::OutOfStock,
            1..=10 => StockStatus::LowStock,
            _ => StockStatus::InStock,
        }
    }
}

/// Product as returned by the API: the stored record plus derived status.
#[derive(Debug, Serialize)]
pub struct ProductView {
    #[serde(flatten)]
    pub product: Product,
    pub status: StockStatus,
}

impl From<Product> for ProductView {
    fn from(product: Product) -> Self {
        let status = StockStatus::classify(product.quantity);
        Self { product, status }
    }
}

/// One page of the product listing.
#[derive(Debug, Serialize)]
pub struct ProductPage {
    pub products: Vec<ProductView>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
}
