use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

use crate::error::ApiError;

/// Product record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i32,
    pub name: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub product_type: String,
    pub sku: String,
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub quantity: i32,
    pub price: Decimal,
    #[serde(rename = "createdAt", with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(rename = "updatedAt", with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Product {
    /// Set a new quantity and refresh `updated_at`. The outer request guard
    /// already rejects negatives; this is the last line of defense when the
    /// method is called directly.
    pub fn update_quantity(&mut self, quantity: i32) -> Result<(), ApiError> {
        if quantity < 0 {
            return Err(ApiError::validation("Quantity cannot be negative"));
        }
        self.quantity = quantity;
        self.updated_at = OffsetDateTime::now_utc();
        Ok(())
    }
}

/// Field set for an insert; ids and timestamps are store-assigned.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub product_type: String,
    pub sku: String,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub quantity: i32,
    pub price: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Product {
        Product {
            id: 1,
            name: "Widget".into(),
            product_type: "Tool".into(),
            sku: "WID-001".into(),
            image_url: None,
            description: None,
            quantity: 5,
            price: Decimal::new(999, 2), // 9.99
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn update_quantity_sets_value_and_refreshes_timestamp() {
        let mut product = sample();
        let before = product.updated_at;
        product.update_quantity(0).unwrap();
        assert_eq!(product.quantity, 0);
        assert!(product.updated_at > before);
    }

    #[test]
    fn update_quantity_rejects_negative_and_leaves_product_unchanged() {
        let mut product = sample();
        let err = product.update_quantity(-1).unwrap_err();
        assert_eq!(err.to_string(), "Quantity cannot be negative");
        assert_eq!(product.quantity, 5);
        assert_eq!(product.updated_at, OffsetDateTime::UNIX_EPOCH);
    }

    #[test]
    fn product_json_uses_api_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["type"], "Tool");
        assert_eq!(json["sku"], "WID-001");
        assert!(json.get("imageUrl").is_some());
        assert!(json.get("product_type").is_none());
        assert!((json["price"].as_f64().unwrap() - 9.99).abs() < 1e-9);
    }
}
