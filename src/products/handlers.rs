use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};
use tracing::{info, instrument};

use crate::auth::extractors::CurrentUser;
use crate::error::ApiError;
use crate::products::dto::{CreateProductRequest, ListQuery, UpdateQuantityRequest};
use crate::products::services;
use crate::response::ApiResponse;
use crate::state::AppState;

pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route("/products/:id/quantity", put(update_quantity))
}

#[instrument(skip(state, _user))]
async fn list_products(
    State(state): State<AppState>,
    _user: CurrentUser,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = services::list_products(&state, query.page, query.limit).await?;
    Ok(ApiResponse::ok("Products retrieved successfully", page))
}

#[instrument(skip(state, user, payload))]
async fn create_product(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<CreateProductRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let product = services::create_product(&state, payload).await?;
    info!(
        product_id = product.product.id,
        sku = %product.product.sku,
        user_id = user.id,
        "product created"
    );
    Ok(ApiResponse::created("Product created successfully", product))
}

#[instrument(skip(state, user, payload))]
async fn update_quantity(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateQuantityRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let product = services::update_quantity(&state, id, payload.quantity).await?;
    info!(
        product_id = product.product.id,
        quantity = product.product.quantity,
        user_id = user.id,
        "product quantity updated"
    );
    Ok(ApiResponse::ok(
        "Product quantity updated successfully",
        product,
    ))
}
