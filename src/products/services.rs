use rust_decimal::Decimal;
use tracing::warn;

use crate::error::ApiError;
use crate::products::dto::{CreateProductRequest, ProductPage, ProductView};
use crate::products::repo_types::{NewProduct, Product};
use crate::state::AppState;

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_LIMIT: i64 = 10;
const MAX_LIMIT: i64 = 100;

/// Field checks in the order the API contract promises them; the first
/// failure wins.
fn validate_new_product(req: CreateProductRequest) -> Result<NewProduct, ApiError> {
    let (quantity, price) = match (req.quantity, req.price) {
        (Some(q), Some(p))
            if !req.name.is_empty() && !req.product_type.is_empty() && !req.sku.is_empty() =>
        {
            (q, p)
        }
        _ => {
            return Err(ApiError::validation(
                "Name, type, SKU, quantity, and price are required",
            ))
        }
    };

    if quantity < 0 {
        return Err(ApiError::validation(
            "Quantity must be a non-negative number",
        ));
    }
    if price < Decimal::ZERO {
        return Err(ApiError::validation("Price must be a non-negative number"));
    }
    if req.sku.len() < 3 {
        return Err(ApiError::validation(
            "SKU must be at least 3 characters long",
        ));
    }
    if req.name.len() > 100 {
        return Err(ApiError::validation(
            "Name must be at most 100 characters long",
        ));
    }
    if req.product_type.len() > 50 {
        return Err(ApiError::validation(
            "Type must be at most 50 characters long",
        ));
    }
    if req.sku.len() > 50 {
        return Err(ApiError::validation(
            "SKU must be at most 50 characters long",
        ));
    }

    Ok(NewProduct {
        name: req.name,
        product_type: req.product_type,
        sku: req.sku,
        image_url: req.image_url,
        description: req.description,
        quantity,
        price,
    })
}

fn page_params(page: Option<i64>, limit: Option<i64>) -> Result<(i64, i64), ApiError> {
    let page = page.unwrap_or(DEFAULT_PAGE);
    let limit = limit.unwrap_or(DEFAULT_LIMIT);

    if page < 1 {
        return Err(ApiError::validation("Page must be a positive number"));
    }
    if limit < 1 || limit > MAX_LIMIT {
        return Err(ApiError::validation("Limit must be between 1 and 100"));
    }
    Ok((page, limit))
}

fn total_pages(total: i64, limit: i64) -> i64 {
    (total + limit - 1) / limit
}

/// Create a product after the full validation chain and the SKU uniqueness
/// pre-check. The unique index remains authoritative under races; a late
/// rejection from the store still surfaces as a conflict.
pub async fn create_product(
    state: &AppState,
    req: CreateProductRequest,
) -> Result<ProductView, ApiError> {
    let new = validate_new_product(req)?;

    if Product::find_by_sku(&state.db, &new.sku).await?.is_some() {
        warn!(sku = %new.sku, "product creation with taken sku");
        return Err(ApiError::conflict("Product with this SKU already exists"));
    }

    let product = Product::insert(&state.db, &new).await?;
    Ok(ProductView::from(product))
}

/// One page of the catalog, newest first, with the listing totals.
pub async fn list_products(
    state: &AppState,
    page: Option<i64>,
    limit: Option<i64>,
) -> Result<ProductPage, ApiError> {
    let (page, limit) = page_params(page, limit)?;
    let offset = (page - 1) * limit;

    let rows = Product::list_page(&state.db, limit, offset).await?;
    let total = Product::count(&state.db).await?;

    Ok(ProductPage {
        products: rows.into_iter().map(ProductView::from).collect(),
        total,
        page,
        limit,
        total_pages: total_pages(total, limit),
    })
}

/// Replace a product's quantity. The only mutating path for an existing
/// product; every other field is immutable after creation.
pub async fn update_quantity(
    state: &AppState,
    id: i32,
    quantity: Option<i32>,
) -> Result<ProductView, ApiError> {
    let quantity = match quantity {
        Some(q) if q >= 0 => q,
        _ => {
            return Err(ApiError::validation(
                "Quantity must be a non-negative number",
            ))
        }
    };

    let mut product = Product::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product not found"))?;

    product.update_quantity(quantity)?;
    let product =
        Product::persist_quantity(&state.db, product.id, product.quantity, product.updated_at)
            .await?;
    Ok(ProductView::from(product))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_request() -> CreateProductRequest {
        CreateProductRequest {
            name: "Widget".into(),
            product_type: "Tool".into(),
            sku: "WID-001".into(),
            image_url: None,
            description: None,
            quantity: Some(5),
            price: Some(Decimal::new(999, 2)),
        }
    }

    #[test]
    fn create_validation_requires_all_mandatory_fields() {
        for broken in [
            CreateProductRequest {
                name: String::new(),
                ..full_request()
            },
            CreateProductRequest {
                sku: String::new(),
                ..full_request()
            },
            CreateProductRequest {
                quantity: None,
                ..full_request()
            },
            CreateProductRequest {
                price: None,
                ..full_request()
            },
        ] {
            let err = validate_new_product(broken).unwrap_err();
            assert_eq!(
                err.to_string(),
                "Name, type, SKU, quantity, and price are required"
            );
        }
    }

    #[test]
    fn create_validation_accepts_zero_quantity_and_price() {
        let req = CreateProductRequest {
            quantity: Some(0),
            price: Some(Decimal::ZERO),
            ..full_request()
        };
        assert!(validate_new_product(req).is_ok());
    }

    #[test]
    fn create_validation_rejects_negative_numbers() {
        let err = validate_new_product(CreateProductRequest {
            quantity: Some(-1),
            ..full_request()
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "Quantity must be a non-negative number");

        let err = validate_new_product(CreateProductRequest {
            price: Some(Decimal::new(-1, 2)),
            ..full_request()
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "Price must be a non-negative number");
    }

    #[test]
    fn create_validation_enforces_sku_bounds() {
        let err = validate_new_product(CreateProductRequest {
            sku: "AB".into(),
            ..full_request()
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "SKU must be at least 3 characters long");

        let err = validate_new_product(CreateProductRequest {
            sku: "X".repeat(51),
            ..full_request()
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "SKU must be at most 50 characters long");
    }

    #[test]
    fn create_validation_enforces_name_and_type_caps() {
        let err = validate_new_product(CreateProductRequest {
            name: "x".repeat(101),
            ..full_request()
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "Name must be at most 100 characters long");

        let err = validate_new_product(CreateProductRequest {
            product_type: "x".repeat(51),
            ..full_request()
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "Type must be at most 50 characters long");
    }

    #[test]
    fn page_params_apply_defaults() {
        assert_eq!(page_params(None, None).unwrap(), (1, 10));
        assert_eq!(page_params(Some(3), Some(25)).unwrap(), (3, 25));
    }

    #[test]
    fn page_params_reject_out_of_range_values() {
        let err = page_params(Some(0), None).unwrap_err();
        assert_eq!(err.to_string(), "Page must be a positive number");

        let err = page_params(None, Some(0)).unwrap_err();
        assert_eq!(err.to_string(), "Limit must be between 1 and 100");

        let err = page_params(None, Some(101)).unwrap_err();
        assert_eq!(err.to_string(), "Limit must be between 1 and 100");

        assert!(page_params(None, Some(100)).is_ok());
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(25, 10), 3);
        assert_eq!(total_pages(30, 10), 3);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(0, 10), 0);
    }
}
