use sqlx::PgPool;
use time::OffsetDateTime;

use crate::error::ApiError;
use crate::products::repo_types::{NewProduct, Product};

impl Product {
    pub async fn find_by_id(db: &PgPool, id: i32) -> Result<Option<Product>, ApiError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, type, sku, image_url, description, quantity, price,
                   created_at, updated_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(product)
    }

    pub async fn find_by_sku(db: &PgPool, sku: &str) -> Result<Option<Product>, ApiError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, type, sku, image_url, description, quantity, price,
                   created_at, updated_at
            FROM products
            WHERE sku = $1
            "#,
        )
        .bind(sku)
        .fetch_optional(db)
        .await?;
        Ok(product)
    }

    /// Insert a new product; id and timestamps are assigned by the store.
    pub async fn insert(db: &PgPool, new: &NewProduct) -> Result<Product, ApiError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, type, sku, image_url, description, quantity, price)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, type, sku, image_url, description, quantity, price,
                      created_at, updated_at
            "#,
        )
        .bind(&new.name)
        .bind(&new.product_type)
        .bind(&new.sku)
        .bind(&new.image_url)
        .bind(&new.description)
        .bind(new.quantity)
        .bind(new.price)
        .fetch_one(db)
        .await?;
        Ok(product)
    }

    /// One page of products, newest first. Descending id breaks creation-time
    /// ties so the ordering stays stable across requests.
    pub async fn list_page(db: &PgPool, limit: i64, offset: i64) -> Result<Vec<Product>, ApiError> {
        let rows = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, type, sku, image_url, description, quantity, price,
                   created_at, updated_at
            FROM products
            ORDER BY created_at DESC, id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn count(db: &PgPool) -> Result<i64, ApiError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(db)
            .await?;
        Ok(total)
    }

    /// Persist a quantity change applied in memory by `update_quantity`.
    pub async fn persist_quantity(
        db: &PgPool,
        id: i32,
        quantity: i32,
        updated_at: OffsetDateTime,
    ) -> Result<Product, ApiError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET quantity = $2, updated_at = $3
            WHERE id = $1
            RETURNING id, name, type, sku, image_url, description, quantity, price,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(quantity)
        .bind(updated_at)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| ApiError::not_found("Product not found"))?;
        Ok(product)
    }
}
